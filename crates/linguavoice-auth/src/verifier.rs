use std::time::Duration;

use mini_moka::sync::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use url::Url;

use linguavoice_config::AuthConfig;
use linguavoice_core::VerifiedUser;

use crate::AuthError;

/// Identity payload returned by the identity service
#[derive(Debug, Deserialize)]
struct IdentityResponse {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// Verifies bearer credentials against the hosted identity service
///
/// Successful verifications are cached for the configured TTL, keyed by
/// the SHA-256 of the credential so raw tokens never sit in memory as map
/// keys.
#[derive(Clone)]
pub struct IdentityVerifier {
    http: reqwest::Client,
    issuer_url: Url,
    service_key: SecretString,
    cache: Cache<String, VerifiedUser>,
}

impl IdentityVerifier {
    /// Create a new verifier from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: &AuthConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;

        let cache = Cache::builder()
            .time_to_live(Duration::from_secs(config.cache_ttl_seconds))
            .max_capacity(config.cache_capacity)
            .build();

        Ok(Self {
            http,
            issuer_url: config.issuer_url.clone(),
            service_key: config.service_key.clone(),
            cache,
        })
    }

    /// Verify a bearer credential and return the identity it belongs to
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] when the identity service
    /// rejects the credential, and a transport or API error when the
    /// service cannot be reached
    pub async fn verify(&self, token: &str) -> Result<VerifiedUser, AuthError> {
        let cache_key = sha256_hex(token);

        if let Some(cached) = self.cache.get(&cache_key) {
            return Ok(cached);
        }

        let url = self
            .issuer_url
            .join("auth/v1/user")
            .map_err(|e| AuthError::Api {
                status: 0,
                message: e.to_string(),
            })?;

        let response = self
            .http
            .get(url)
            .header("Authorization", format!("Bearer {token}"))
            .header("apikey", self.service_key.expose_secret())
            .send()
            .await?;

        let status = response.status().as_u16();

        if matches!(status, 401 | 403 | 404) {
            return Err(AuthError::InvalidToken);
        }

        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AuthError::Api { status, message });
        }

        let identity: IdentityResponse = response.json().await.map_err(|e| AuthError::Api {
            status: 0,
            message: format!("failed to parse response: {e}"),
        })?;

        let user = VerifiedUser {
            user_id: identity.id,
            email: identity.email,
        };
        self.cache.insert(cache_key, user.clone());

        tracing::debug!(user_id = %user.user_id, "credential verified");

        Ok(user)
    }
}

impl std::fmt::Debug for IdentityVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityVerifier")
            .field("issuer_url", &self.issuer_url)
            .finish_non_exhaustive()
    }
}

/// Compute the SHA-256 hex digest of a string
fn sha256_hex(input: &str) -> String {
    use std::fmt::Write as _;

    let digest = Sha256::digest(input.as_bytes());
    digest.iter().fold(String::with_capacity(64), |mut out, byte| {
        // Writing hex to a String is infallible
        let _ = write!(out, "{byte:02x}");
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: &str) -> AuthConfig {
        AuthConfig {
            issuer_url: Url::parse(&format!("{base_url}/")).unwrap(),
            service_key: SecretString::from("svc-key"),
            cache_ttl_seconds: 30,
            cache_capacity: 100,
            public_paths: Vec::new(),
        }
    }

    #[tokio::test]
    async fn verify_returns_identity() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .and(header("Authorization", "Bearer tok-1"))
            .and(header("apikey", "svc-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "usr_123",
                "email": "a@example.com"
            })))
            .mount(&server)
            .await;

        let verifier = IdentityVerifier::new(&test_config(&server.uri())).unwrap();

        let user = verifier.verify("tok-1").await.unwrap();
        assert_eq!(user.user_id, "usr_123");
        assert_eq!(user.email.as_deref(), Some("a@example.com"));
    }

    #[tokio::test]
    async fn rejected_credential_is_invalid_token() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let verifier = IdentityVerifier::new(&test_config(&server.uri())).unwrap();

        let err = verifier.verify("bad").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn service_failure_is_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let verifier = IdentityVerifier::new(&test_config(&server.uri())).unwrap();

        let err = verifier.verify("tok").await.unwrap_err();
        assert!(matches!(err, AuthError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn verified_credentials_are_cached() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "usr_123"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let verifier = IdentityVerifier::new(&test_config(&server.uri())).unwrap();

        verifier.verify("tok-cached").await.unwrap();
        let user = verifier.verify("tok-cached").await.unwrap();
        assert_eq!(user.user_id, "usr_123");
        assert!(user.email.is_none());
    }
}
