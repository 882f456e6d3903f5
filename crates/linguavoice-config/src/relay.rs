use serde::Deserialize;

/// Magic-link token relay configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
    /// Maximum lifetime of a relay session in seconds
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
        }
    }
}

const fn default_ttl_seconds() -> u64 {
    300
}
