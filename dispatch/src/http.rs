//! JSON-RPC 2.0 over HTTP — the production transport.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use dmesh_types::NodeAddress;

use crate::transport::{RpcFailure, RpcTransport};

/// Default timeout for one request.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP transport speaking JSON-RPC 2.0 to masternodes.
///
/// Wraps a `reqwest::Client` (reusable connection pool). One instance is
/// shared by every component that talks to the network.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: &'a serde_json::Value,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

impl HttpTransport {
    /// Create a transport with default timeout settings.
    pub fn new() -> Self {
        Self::with_timeouts(DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a transport with custom request and connect timeouts.
    pub fn with_timeouts(timeout: Duration, connect_timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .unwrap_or_default();
        Self { http }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl RpcTransport for HttpTransport {
    async fn request(
        &self,
        address: &NodeAddress,
        method: &str,
        params: &serde_json::Value,
    ) -> Result<serde_json::Value, RpcFailure> {
        let url = format!("http://{address}/");
        let body = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        let response = self.http.post(&url).json(&body).send().await.map_err(|e| {
            if e.is_timeout() {
                RpcFailure::Transport(format!("request timed out: {e}"))
            } else if e.is_connect() {
                RpcFailure::Transport(format!("connection failed: {e}"))
            } else {
                RpcFailure::Transport(e.to_string())
            }
        })?;

        // A non-2xx status is a node-health signal, same as unreachable.
        let status = response.status();
        if !status.is_success() {
            return Err(RpcFailure::Transport(format!("HTTP status {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RpcFailure::Transport(format!("body read failed: {e}")))?;

        decode_envelope(&bytes)
    }
}

/// Decode a JSON-RPC response body into a result or a classified failure.
///
/// `"result": null` is a legitimate answer and is kept distinct from a
/// missing `result` key; `"error": null` means no error.
fn decode_envelope(body: &[u8]) -> Result<serde_json::Value, RpcFailure> {
    let envelope: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| RpcFailure::Protocol(format!("undecodable response body: {e}")))?;
    let object = envelope
        .as_object()
        .ok_or_else(|| RpcFailure::Protocol("response body is not a JSON object".into()))?;

    if let Some(raw_error) = object.get("error") {
        if !raw_error.is_null() {
            let parsed: RpcErrorObject = serde_json::from_value(raw_error.clone())
                .map_err(|e| RpcFailure::Protocol(format!("malformed error object: {e}")))?;
            return Err(RpcFailure::Application {
                code: parsed.code,
                message: parsed.message,
            });
        }
    }

    object
        .get("result")
        .cloned()
        .ok_or_else(|| RpcFailure::Protocol("response carries neither result nor error".into()))
}
