use std::collections::HashMap;

use serde::Deserialize;

/// Hosted checkout session created at the payment provider
///
/// Only the fields this backend relays are decoded; the provider's full
/// session object layout is its own concern.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    /// Provider session identifier
    pub id: String,
    /// Hosted checkout page the browser is sent to
    pub url: String,
}

/// Webhook delivery from the payment provider
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    /// Event type (e.g. `checkout.session.completed`)
    #[serde(rename = "type")]
    pub event_type: String,
    /// Event payload
    pub data: WebhookData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookData {
    /// The object the event describes
    pub object: WebhookObject,
}

/// Checkout object carried inside a webhook event
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookObject {
    /// Our user id, round-tripped through checkout creation
    #[serde(default)]
    pub client_reference_id: Option<String>,
    /// Customer email as the provider saw it
    #[serde(default)]
    pub customer_email: Option<String>,
    /// Metadata attached at checkout creation; carries the plan name
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl WebhookEvent {
    /// Plan name attached at checkout creation, if present
    pub fn plan(&self) -> Option<&str> {
        self.data.object.metadata.get("plan").map(String::as_str)
    }
}
