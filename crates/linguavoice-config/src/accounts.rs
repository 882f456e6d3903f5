use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Hosted user record store configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountsConfig {
    /// Base URL of the record store API
    pub base_url: Url,

    /// Service key for store access
    pub service_key: SecretString,
}
