/// Identity verification errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Credential was rejected by the identity service
    #[error("invalid or expired credential")]
    InvalidToken,

    /// HTTP request to the identity service failed
    #[error("identity verification failed: {0}")]
    VerificationFailed(#[from] reqwest::Error),

    /// Identity service returned an unexpected response
    #[error("identity service error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the service
        message: String,
    },
}
