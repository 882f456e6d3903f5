use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use linguavoice_auth::{AuthError, IdentityVerifier};
use linguavoice_core::Caller;

use crate::error::ApiError;

/// Resolve the caller's identity from an optional bearer credential
///
/// A missing credential is the valid anonymous path; an invalid or expired
/// one is a hard 401. Public paths (health, relay endpoints, webhooks)
/// skip verification entirely.
pub(crate) async fn auth_middleware(
    verifier: IdentityVerifier,
    public_paths: Vec<String>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();

    if public_paths.iter().any(|p| path.starts_with(p)) {
        return next.run(request).await;
    }

    let token = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_owned);

    let Some(token) = token else {
        request.extensions_mut().insert(Caller::Anonymous);
        return next.run(request).await;
    };

    match verifier.verify(&token).await {
        Ok(user) => {
            request.extensions_mut().insert(Caller::User(user));
            next.run(request).await
        }
        Err(AuthError::InvalidToken) => {
            tracing::debug!("rejected invalid bearer credential");
            ApiError::InvalidCredential.into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "identity verification unavailable");
            ApiError::Downstream("identity service").into_response()
        }
    }
}
