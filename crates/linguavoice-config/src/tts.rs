use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Speech-synthesis provider configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsConfig {
    /// Base URL of the speech API (including the version prefix)
    pub base_url: Url,

    /// API key
    pub api_key: SecretString,

    /// Model used for synthesis requests
    #[serde(default = "default_model")]
    pub model: String,

    /// Voice used when the request does not name one
    #[serde(default = "default_voice")]
    pub default_voice: String,
}

fn default_model() -> String {
    "tts-1".to_string()
}

fn default_voice() -> String {
    "alloy".to_string()
}
