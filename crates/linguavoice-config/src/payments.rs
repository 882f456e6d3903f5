use indexmap::IndexMap;
use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Payment provider configuration
///
/// Opt-in section; without it the checkout and webhook routes are not
/// mounted.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaymentsConfig {
    /// Base URL of the payment provider API
    pub base_url: Url,

    /// Secret key for provider API calls
    pub secret_key: SecretString,

    /// Shared secret expected on inbound webhook deliveries
    pub webhook_secret: SecretString,

    /// Provider price identifiers keyed by plan name
    #[serde(default)]
    pub prices: IndexMap<String, String>,

    /// Browser destination after a completed checkout
    pub success_url: Url,

    /// Browser destination after an abandoned checkout
    pub cancel_url: Url,
}
