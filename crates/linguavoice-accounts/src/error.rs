/// Errors from the hosted user record store
#[derive(Debug, thiserror::Error)]
pub enum AccountsError {
    /// HTTP request to the record store failed
    #[error("record store request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Record store returned a non-success response
    #[error("record store error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the store
        message: String,
    },
}
