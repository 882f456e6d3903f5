use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use linguavoice_config::TranslationConfig;

use crate::error::TranslationError;

/// Upper bound on translated output; generation inputs are short
const MAX_COMPLETION_TOKENS: u32 = 1500;

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Forwards translation requests to a chat-completions API
///
/// The provider is steered with a fixed system prompt and temperature 0 so
/// the completion is the translated text and nothing else.
#[derive(Clone)]
pub struct TranslationClient {
    http: reqwest::Client,
    base: String,
    api_key: SecretString,
    model: String,
}

impl TranslationClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: &TranslationConfig) -> Result<Self, TranslationError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| TranslationError::Connection(e.to_string()))?;

        Ok(Self {
            http,
            base: config.base_url.as_str().trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    /// Translate text into the target language
    pub async fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslationError> {
        let url = format!("{}/chat/completions", self.base);

        tracing::debug!(
            model = %self.model,
            target_language,
            input_len = text.len(),
            "translation request"
        );

        let system_prompt = format!(
            "You are a translator that converts any input text to {target_language}. \
             Return only the translated text and no other commentary."
        );

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
            temperature: 0.0,
            max_tokens: MAX_COMPLETION_TOKENS,
        };

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key.expose_secret()))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("translation request failed: {e}");
                TranslationError::Connection(e.to_string())
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!("translation provider error ({status}): {error_text}");

            return Err(match status.as_u16() {
                401 => TranslationError::AuthenticationFailed(error_text),
                400 => TranslationError::InvalidRequest(error_text),
                _ => TranslationError::Api {
                    status: status.as_u16(),
                    message: error_text,
                },
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::UnexpectedResponse(e.to_string()))?;

        let translated = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| TranslationError::UnexpectedResponse("completion contained no choices".to_string()))?;

        tracing::debug!(output_len = translated.len(), "translation complete");

        Ok(translated.trim().to_string())
    }
}

impl std::fmt::Debug for TranslationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationClient")
            .field("base", &self.base)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}
