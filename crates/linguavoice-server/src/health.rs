use axum::Json;
use axum::response::IntoResponse;

/// Health check handler for uptime probes
pub(crate) async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "linguavoice-backend",
    }))
}
