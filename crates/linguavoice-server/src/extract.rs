use axum::body::Body;
use axum::extract::FromRequest;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Body limit for API requests (1 MiB)
const BODY_LIMIT_BYTES: usize = 1 << 20;

/// JSON extractor whose rejections use the API error body shape
///
/// axum's stock `Json` rejects with plain-text bodies; every failure out
/// of this service carries the `{"status":"error"}` envelope instead.
pub(crate) struct ApiJson<T>(pub T);

impl<S, T: DeserializeOwned> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: http::Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let body = request.into_body();

        let bytes = axum::body::to_bytes(body, BODY_LIMIT_BYTES)
            .await
            .map_err(|e| ApiError::InvalidInput(format!("failed to read request body: {e}")))?;

        serde_json::from_slice(&bytes)
            .map(ApiJson)
            .map_err(|e| ApiError::InvalidInput(format!("invalid request body: {e}")))
    }
}
