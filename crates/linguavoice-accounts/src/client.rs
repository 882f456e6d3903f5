use secrecy::{ExposeSecret, SecretString};
use url::Url;

use linguavoice_config::AccountsConfig;

use crate::error::AccountsError;
use crate::types::{AddUsageRequest, CreateRecordRequest, SetPlanRequest, UserRecord};

/// Async HTTP client for the hosted user record store
#[derive(Clone)]
pub struct RecordStoreClient {
    http: reqwest::Client,
    base_url: Url,
    service_key: SecretString,
}

impl RecordStoreClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: &AccountsConfig) -> Result<Self, AccountsError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(AccountsError::Request)?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            service_key: config.service_key.clone(),
        })
    }

    /// Fetch a user record by id
    ///
    /// GET `/users/:userId` — 404 means the record does not exist yet.
    pub async fn fetch(&self, user_id: &str) -> Result<Option<UserRecord>, AccountsError> {
        let url = self.endpoint(&format!("users/{user_id}"))?;

        let response = self
            .http
            .get(url)
            .header("x-service-key", self.service_key.expose_secret())
            .send()
            .await?;

        if response.status().as_u16() == 404 {
            return Ok(None);
        }

        if response.status().is_success() {
            Ok(Some(response.json().await?))
        } else {
            Err(api_error(response).await)
        }
    }

    /// Create a record with zero usage on the given plan
    ///
    /// POST `/users`
    pub async fn create(
        &self,
        user_id: &str,
        email: Option<&str>,
        plan: &str,
    ) -> Result<UserRecord, AccountsError> {
        let url = self.endpoint("users")?;

        let body = CreateRecordRequest { user_id, email, plan };

        let response = self
            .http
            .post(url)
            .header("x-service-key", self.service_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(api_error(response).await)
        }
    }

    /// Fetch a record, lazily creating it on first sight
    pub async fn fetch_or_create(
        &self,
        user_id: &str,
        email: Option<&str>,
        default_plan: &str,
    ) -> Result<UserRecord, AccountsError> {
        match self.fetch(user_id).await? {
            Some(record) => Ok(record),
            None => {
                tracing::debug!(%user_id, plan = %default_plan, "creating user record");
                self.create(user_id, email, default_plan).await
            }
        }
    }

    /// Increment the usage counter for the current billing period
    ///
    /// POST `/users/:userId/usage`
    pub async fn add_usage(&self, user_id: &str, delta: u64) -> Result<(), AccountsError> {
        let url = self.endpoint(&format!("users/{user_id}/usage"))?;

        let response = self
            .http
            .post(url)
            .header("x-service-key", self.service_key.expose_secret())
            .json(&AddUsageRequest { delta })
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(api_error(response).await)
        }
    }

    /// Switch a record to a different plan
    ///
    /// PATCH `/users/:userId`
    pub async fn set_plan(&self, user_id: &str, plan: &str) -> Result<(), AccountsError> {
        let url = self.endpoint(&format!("users/{user_id}"))?;

        let response = self
            .http
            .patch(url)
            .header("x-service-key", self.service_key.expose_secret())
            .json(&SetPlanRequest { plan })
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(api_error(response).await)
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, AccountsError> {
        self.base_url.join(path).map_err(|e| AccountsError::Api {
            status: 0,
            message: format!("invalid URL: {e}"),
        })
    }
}

impl std::fmt::Debug for RecordStoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStoreClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

async fn api_error(response: reqwest::Response) -> AccountsError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    AccountsError::Api { status, message }
}
