use secrecy::{ExposeSecret, SecretString};
use url::Url;

use linguavoice_config::PaymentsConfig;

use crate::error::PaymentsError;
use crate::types::CheckoutSession;

/// Inputs for creating a hosted checkout session
#[derive(Debug)]
pub struct CheckoutParams<'a> {
    /// User the subscription belongs to; round-tripped via the webhook
    pub user_id: &'a str,
    /// Customer email for the checkout page
    pub email: Option<&'a str>,
    /// Provider price identifier for the selected plan
    pub price_id: &'a str,
    /// Plan name, attached as metadata for the webhook to read back
    pub plan: &'a str,
}

/// Async HTTP client for the hosted payment provider
#[derive(Clone)]
pub struct PaymentsClient {
    http: reqwest::Client,
    base_url: Url,
    secret_key: SecretString,
    success_url: Url,
    cancel_url: Url,
}

impl PaymentsClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: &PaymentsConfig) -> Result<Self, PaymentsError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .map_err(PaymentsError::Request)?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            secret_key: config.secret_key.clone(),
            success_url: config.success_url.clone(),
            cancel_url: config.cancel_url.clone(),
        })
    }

    /// Create a hosted checkout session and return its redirect URL
    ///
    /// POST `/v1/checkout/sessions` (form-encoded, as the provider expects)
    pub async fn create_checkout_session(
        &self,
        params: &CheckoutParams<'_>,
    ) -> Result<CheckoutSession, PaymentsError> {
        let url = self
            .base_url
            .join("v1/checkout/sessions")
            .map_err(|e| PaymentsError::Api {
                status: 0,
                message: format!("invalid URL: {e}"),
            })?;

        let mut form: Vec<(&str, &str)> = vec![
            ("mode", "subscription"),
            ("client_reference_id", params.user_id),
            ("line_items[0][price]", params.price_id),
            ("line_items[0][quantity]", "1"),
            ("metadata[plan]", params.plan),
            ("success_url", self.success_url.as_str()),
            ("cancel_url", self.cancel_url.as_str()),
        ];
        if let Some(email) = params.email {
            form.push(("customer_email", email));
        }

        let response = self
            .http
            .post(url)
            .header(
                "Authorization",
                format!("Bearer {}", self.secret_key.expose_secret()),
            )
            .form(&form)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            Err(PaymentsError::Api { status, message })
        }
    }
}

impl std::fmt::Debug for PaymentsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentsClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
