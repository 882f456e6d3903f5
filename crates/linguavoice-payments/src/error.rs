/// Errors from the payment provider
#[derive(Debug, thiserror::Error)]
pub enum PaymentsError {
    /// HTTP request to the provider failed
    #[error("payment provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Provider returned a non-success response
    #[error("payment provider error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the provider
        message: String,
    },
}
