use axum::extract::State;
use axum::{Extension, Json};
use http::{HeaderMap, StatusCode};
use indexmap::IndexMap;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use linguavoice_accounts::RecordStoreClient;
use linguavoice_core::Caller;
use linguavoice_payments::{CheckoutParams, PaymentsClient, WebhookEvent};

use crate::error::ApiError;
use crate::extract::ApiJson;

/// Shared state for the payment relay routes
#[derive(Clone)]
pub(crate) struct BillingState {
    pub payments: PaymentsClient,
    pub prices: IndexMap<String, String>,
    pub webhook_secret: SecretString,
    pub records: RecordStoreClient,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CheckoutRequest {
    plan: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CheckoutResponse {
    checkout_url: String,
}

/// Relay a plan selection to the payment provider's hosted checkout
pub(crate) async fn create_checkout_session(
    State(billing): State<BillingState>,
    Extension(caller): Extension<Caller>,
    ApiJson(request): ApiJson<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let Some(user) = caller.user() else {
        return Err(ApiError::Unauthenticated);
    };

    let Some(price_id) = billing.prices.get(&request.plan) else {
        return Err(ApiError::InvalidInput(format!("unknown plan: {}", request.plan)));
    };

    let session = billing
        .payments
        .create_checkout_session(&CheckoutParams {
            user_id: &user.user_id,
            email: user.email.as_deref(),
            price_id,
            plan: &request.plan,
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "checkout session creation failed");
            ApiError::Downstream("payment provider")
        })?;

    tracing::info!(user_id = %user.user_id, plan = %request.plan, "checkout session created");

    Ok(Json(CheckoutResponse {
        checkout_url: session.url,
    }))
}

/// Handle payment provider webhooks
///
/// Validates the shared webhook secret, then applies completed checkouts
/// to the user record store. Unrecognized event types are acknowledged so
/// the provider stops retrying them.
pub(crate) async fn webhook_handler(
    State(billing): State<BillingState>,
    headers: HeaderMap,
    ApiJson(event): ApiJson<WebhookEvent>,
) -> Result<StatusCode, ApiError> {
    let secret = headers.get("x-webhook-secret").and_then(|v| v.to_str().ok());

    if secret != Some(billing.webhook_secret.expose_secret()) {
        return Err(ApiError::InvalidCredential);
    }

    if event.event_type == "checkout.session.completed" {
        match (event.data.object.client_reference_id.as_deref(), event.plan()) {
            (Some(user_id), Some(plan)) => {
                billing.records.set_plan(user_id, plan).await.map_err(|e| {
                    tracing::error!(error = %e, "plan update from webhook failed");
                    ApiError::Downstream("account store")
                })?;
                tracing::info!(%user_id, plan, "plan updated from completed checkout");
            }
            _ => {
                tracing::warn!("completed checkout missing user reference or plan metadata");
            }
        }
    } else {
        tracing::debug!(event_type = %event.event_type, "ignoring webhook event");
    }

    Ok(StatusCode::OK)
}
