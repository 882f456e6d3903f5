use http::StatusCode;

/// Trait for domain errors that can be rendered as HTTP failures
///
/// Implemented by each feature crate's error type so the server layer can
/// build the `{"status":"error","message":...}` body without the domain
/// crates depending on axum.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}
