use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Translation provider configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranslationConfig {
    /// Base URL of the chat-completions API (including the version prefix)
    pub base_url: Url,

    /// API key
    pub api_key: SecretString,

    /// Model used for translation requests
    #[serde(default = "default_model")]
    pub model: String,

    /// Target languages that match the source text and skip translation
    #[serde(default = "default_source_languages")]
    pub source_languages: Vec<String>,
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_source_languages() -> Vec<String> {
    vec!["english".to_string(), "en".to_string()]
}
