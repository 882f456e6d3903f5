use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use linguavoice_config::TtsConfig;

use crate::error::TtsError;

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
}

/// Forwards synthesis requests to the speech provider
///
/// Returns the raw audio bytes; encoding them for the response body is the
/// caller's concern.
#[derive(Clone)]
pub struct SpeechClient {
    http: reqwest::Client,
    base: String,
    api_key: SecretString,
    model: String,
}

impl SpeechClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: &TtsConfig) -> Result<Self, TtsError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| TtsError::Connection(e.to_string()))?;

        Ok(Self {
            http,
            base: config.base_url.as_str().trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    /// Synthesize speech for the given text and voice
    pub async fn synthesize(&self, input: &str, voice: &str) -> Result<Vec<u8>, TtsError> {
        let url = format!("{}/audio/speech", self.base);

        tracing::debug!(
            model = %self.model,
            voice,
            input_len = input.len(),
            "speech synthesis request"
        );

        let body = SpeechRequest {
            model: &self.model,
            input,
            voice,
        };

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key.expose_secret()))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("speech request failed: {e}");
                TtsError::Connection(e.to_string())
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!("speech provider error ({status}): {error_text}");

            return Err(match status.as_u16() {
                401 => TtsError::AuthenticationFailed(error_text),
                400 => TtsError::InvalidRequest(error_text),
                _ => TtsError::Api {
                    status: status.as_u16(),
                    message: error_text,
                },
            });
        }

        let audio = response.bytes().await.map_err(|e| {
            tracing::error!("failed to read speech response body: {e}");
            TtsError::Connection(e.to_string())
        })?;

        tracing::debug!(bytes = audio.len(), "speech synthesis complete");

        Ok(audio.to_vec())
    }
}

impl std::fmt::Debug for SpeechClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechClient")
            .field("base", &self.base)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}
