use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use linguavoice_auth::{Collect, TokenRelay as _};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::AppState;

#[derive(Debug, Serialize)]
pub(crate) struct MagicSessionResponse {
    key: String,
    redirect_to: String,
}

/// Open a relay session for a cross-context login
///
/// The returned `redirect_to` is handed to the identity provider as the
/// magic link's destination; the key in its query string ties the redirect
/// back to this session.
pub(crate) async fn create_magic_session(State(state): State<Arc<AppState>>) -> Json<MagicSessionResponse> {
    let key = state.relay.begin().await;

    let mut redirect_to = state.callback_url.clone();
    redirect_to.set_query(Some(&format!("key={key}")));

    Json(MagicSessionResponse {
        key,
        redirect_to: redirect_to.into(),
    })
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReceiveTokenRequest {
    key: String,
    token: String,
}

/// Publish the credential extracted by the callback page
pub(crate) async fn receive_token(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<ReceiveTokenRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .relay
        .publish(&request.key, request.token)
        .await
        .map_err(|_| ApiError::SessionNotFound)?;

    Ok(Json(serde_json::json!({ "status": "ok" })))
}

#[derive(Debug, Deserialize)]
pub(crate) struct PollTokenQuery {
    key: String,
}

/// Poll a relay session from the originating client
///
/// 200 delivers the credential and consumes the session; 204 means keep
/// polling; 404 means restart the flow with a fresh session.
pub(crate) async fn poll_token(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PollTokenQuery>,
) -> Response {
    match state.relay.collect(&query.key).await {
        Collect::Ready(token) => {
            tracing::debug!("relay credential delivered");
            (StatusCode::OK, Json(serde_json::json!({ "token": token }))).into_response()
        }
        Collect::Pending => StatusCode::NO_CONTENT.into_response(),
        Collect::NotFound => ApiError::SessionNotFound.into_response(),
    }
}

/// Redirect-target page for the hosted login flow
///
/// The identity provider leaves the session credential in the URL
/// fragment, which only this page's script can see; it republishes the
/// credential through `/auth/receive_token` using the key from its own
/// query string.
pub(crate) async fn callback_page() -> Html<&'static str> {
    Html(CALLBACK_PAGE)
}

const CALLBACK_PAGE: &str = r#"<!doctype html>
<html>
<head>
  <meta charset="utf-8">
  <title>Linguavoice sign-in</title>
</head>
<body>
  <p id="message">Completing sign-in&hellip;</p>
  <script>
    const message = document.getElementById("message");
    const key = new URLSearchParams(window.location.search).get("key");
    const fragment = new URLSearchParams(window.location.hash.slice(1));
    const token = fragment.get("access_token");

    if (key && token) {
      fetch("/auth/receive_token", {
        method: "POST",
        headers: { "content-type": "application/json" },
        body: JSON.stringify({ key, token }),
      })
        .then((res) => {
          message.textContent = res.ok
            ? "Signed in. You can return to the app."
            : "This sign-in link has expired. Please request a new one.";
        })
        .catch(() => {
          message.textContent = "Sign-in could not be completed. Please try again.";
        });
    } else {
      message.textContent = "Missing sign-in data. Please request a new link.";
    }
  </script>
</body>
</html>
"#;
