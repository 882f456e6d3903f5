use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Hosted identity service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Base URL of the identity service
    pub issuer_url: Url,

    /// Service key sent alongside bearer credentials when verifying
    pub service_key: SecretString,

    /// Cache TTL in seconds for verified credentials
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: u64,

    /// Maximum number of cached verifications
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,

    /// Path prefixes that skip bearer verification entirely
    #[serde(default = "default_public_paths")]
    pub public_paths: Vec<String>,
}

const fn default_cache_ttl() -> u64 {
    30
}

const fn default_cache_capacity() -> u64 {
    10_000
}

fn default_public_paths() -> Vec<String> {
    vec![
        "/health".to_string(),
        "/auth/".to_string(),
        "/billing/webhook".to_string(),
    ]
}
