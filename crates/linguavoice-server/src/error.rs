use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use linguavoice_core::HttpError;
use thiserror::Error;

/// Request-level failures surfaced to API consumers
///
/// Downstream causes are logged where they occur; only the collaborator
/// name reaches the caller, never upstream bodies or stack detail.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request is missing required fields or malformed
    #[error("{0}")]
    InvalidInput(String),

    /// Route requires a credential and none was presented
    #[error("authentication required")]
    Unauthenticated,

    /// Presented credential was rejected by the identity service
    #[error("invalid or expired credential")]
    InvalidCredential,

    /// Admission control turned the request away
    #[error("{0}")]
    QuotaExceeded(String),

    /// Relay session key unknown, expired, or already consumed
    #[error("session not found or expired")]
    SessionNotFound,

    /// A collaborator call failed or timed out
    #[error("{0} request failed")]
    Downstream(&'static str),
}

impl HttpError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated | Self::InvalidCredential => StatusCode::UNAUTHORIZED,
            Self::QuotaExceeded(_) => StatusCode::PAYMENT_REQUIRED,
            Self::SessionNotFound => StatusCode::NOT_FOUND,
            Self::Downstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(serde_json::json!({
            "status": "error",
            "message": self.client_message(),
        }));

        (status, body).into_response()
    }
}
