use std::sync::Arc;

use axum::extract::State;
use axum::{Extension, Json};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use linguavoice_accounts::{AccountUsage, Decision, QuotaContext, UsageDelta};
use linguavoice_core::Caller;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateRequest {
    #[serde(default)]
    text: String,
    #[serde(default)]
    language: String,
    #[serde(default)]
    voice: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateResponse {
    status: &'static str,
    translated_text: String,
    audio_base64: String,
}

/// Generation pipeline: validate, admit, translate, synthesize
///
/// Quota is evaluated before either paid downstream call. Usage recording
/// happens after the response is already determined and never fails it.
pub(crate) async fn generate_handler(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<Caller>,
    ApiJson(request): ApiJson<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    if request.text.is_empty() || request.language.is_empty() {
        return Err(ApiError::InvalidInput(
            "text and language are required fields".to_string(),
        ));
    }

    let character_count = request.text.chars().count() as u64;

    let usage = match caller.user() {
        None => None,
        Some(user) => {
            let record = state
                .records
                .fetch_or_create(&user.user_id, user.email.as_deref(), state.quota.default_plan())
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "user record lookup failed");
                    ApiError::Downstream("account store")
                })?;

            Some(AccountUsage {
                plan_ceiling: state.quota.ceiling_for(&record.plan),
                characters_used: record.characters_used,
            })
        }
    };

    let context = QuotaContext {
        character_count,
        usage,
    };

    if let Decision::Reject(reason) = state.quota.evaluate(&context) {
        tracing::info!(
            reason = reason.message(),
            character_count,
            anonymous = caller.is_anonymous(),
            "generation rejected by quota"
        );
        return Err(ApiError::QuotaExceeded(reason.message().to_string()));
    }

    let translated = if state.is_source_language(&request.language) {
        request.text.clone()
    } else {
        state
            .translator
            .translate(&request.text, &request.language)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "translation failed");
                ApiError::Downstream("translation")
            })?
    };

    let voice = request.voice.as_deref().unwrap_or(&state.default_voice);

    let audio = state.speech.synthesize(&translated, voice).await.map_err(|e| {
        tracing::error!(error = %e, "speech synthesis failed");
        ApiError::Downstream("speech synthesis")
    })?;

    let audio_base64 = BASE64.encode(&audio);

    // Best-effort: undercounting on failure is accepted, the response is
    // already determined
    if let Some(user) = caller.user() {
        state.recorder.record(UsageDelta {
            user_id: user.user_id.clone(),
            characters: character_count,
        });
    }

    Ok(Json(GenerateResponse {
        status: "success",
        translated_text: translated,
        audio_base64,
    }))
}
