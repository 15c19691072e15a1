//! Client configuration with TOML file support.

use serde::{Deserialize, Serialize};

use dmesh_types::NodeAddress;

use crate::error::ClientError;

/// Configuration for a [`DmeshClient`](crate::DmeshClient).
///
/// Can be loaded from a TOML file via [`ClientConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Bootstrap seed addresses, `"host"` or `"host:port"`.
    #[serde(default)]
    pub seeds: Vec<String>,

    /// Port assumed for seeds that do not carry one.
    #[serde(default = "default_port")]
    pub default_port: u16,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// How long a fetched masternode list stays fresh.
    #[serde(default = "default_list_ttl_secs")]
    pub list_ttl_secs: u64,

    /// Number of quorum members per identity. Deployment configuration: it
    /// must match the network the client talks to, but is not baked into
    /// the protocol the way the score function is.
    #[serde(default = "default_quorum_size")]
    pub quorum_size: usize,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_port() -> u16 {
    3000
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_list_ttl_secs() -> u64 {
    300
}

fn default_quorum_size() -> usize {
    10
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, ClientError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ClientError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ClientError> {
        toml::from_str(s).map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("ClientConfig is always serializable to TOML")
    }

    /// Parse the configured seed strings into addresses.
    pub fn seed_addresses(&self) -> Result<Vec<NodeAddress>, ClientError> {
        self.seeds
            .iter()
            .map(|s| {
                NodeAddress::parse_with_default_port(s, self.default_port)
                    .map_err(|e| ClientError::Config(e.to_string()))
            })
            .collect()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            seeds: Vec::new(),
            default_port: default_port(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            list_ttl_secs: default_list_ttl_secs(),
            quorum_size: default_quorum_size(),
        }
    }
}
