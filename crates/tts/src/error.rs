/// Errors from the speech-synthesis provider
#[derive(Debug, thiserror::Error)]
pub enum TtsError {
    /// Request could not reach the provider
    #[error("failed to reach speech provider: {0}")]
    Connection(String),

    /// Provider rejected the configured API key
    #[error("speech authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Provider rejected the request as malformed
    #[error("invalid speech request: {0}")]
    InvalidRequest(String),

    /// Provider returned an unexpected error status
    #[error("speech provider error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the provider
        message: String,
    },
}
