/// Errors from the translation provider
#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    /// Request could not reach the provider
    #[error("failed to reach translation provider: {0}")]
    Connection(String),

    /// Provider rejected the configured API key
    #[error("translation authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Provider rejected the request as malformed
    #[error("invalid translation request: {0}")]
    InvalidRequest(String),

    /// Provider returned an unexpected error status
    #[error("translation provider error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the provider
        message: String,
    },

    /// Provider response did not match the expected shape
    #[error("unexpected translation response: {0}")]
    UnexpectedResponse(String),
}
