//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use indexmap::IndexMap;
use secrecy::SecretString;
use url::Url;

use linguavoice_config::{
    AccountsConfig, AuthConfig, Config, PaymentsConfig, QuotaConfig, RelayConfig, ServerConfig, TranslationConfig,
    TtsConfig,
};

use super::mocks::{MockPayments, Mocks};

/// Shared secret the builder configures for webhook deliveries
pub const WEBHOOK_SECRET: &str = "whsec-test";

/// Builder for constructing test configurations against mock collaborators
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a builder wired to the given mocks, with minimal defaults
    pub fn new(mocks: &Mocks) -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    ..ServerConfig::default()
                },
                auth: AuthConfig {
                    issuer_url: parse_base(&mocks.identity.base_url()),
                    service_key: SecretString::from("svc-test"),
                    cache_ttl_seconds: 30,
                    cache_capacity: 100,
                    public_paths: vec![
                        "/health".to_string(),
                        "/auth/".to_string(),
                        "/billing/webhook".to_string(),
                    ],
                },
                relay: RelayConfig::default(),
                quota: QuotaConfig::default(),
                translation: TranslationConfig {
                    base_url: parse_base(&mocks.translator.base_url()),
                    api_key: SecretString::from("sk-test"),
                    model: "gpt-3.5-turbo".to_string(),
                    source_languages: vec!["english".to_string(), "en".to_string()],
                },
                tts: TtsConfig {
                    base_url: parse_base(&mocks.speech.base_url()),
                    api_key: SecretString::from("sk-test"),
                    model: "tts-1".to_string(),
                    default_voice: "alloy".to_string(),
                },
                accounts: AccountsConfig {
                    base_url: parse_base(&mocks.records.base_url()),
                    service_key: SecretString::from("store-test"),
                },
                payments: None,
            },
        }
    }

    /// Shorten the relay session lifetime
    pub fn with_relay_ttl(mut self, ttl_seconds: u64) -> Self {
        self.config.relay.ttl_seconds = ttl_seconds;
        self
    }

    /// Wire the payment relay to a mock provider with one priced plan
    pub fn with_payments(mut self, payments: &MockPayments, plan: &str, price_id: &str) -> Self {
        self.config.quota.plans.insert(plan.to_string(), 200_000);
        self.config.payments = Some(PaymentsConfig {
            base_url: parse_base(&payments.base_url()),
            secret_key: SecretString::from("sk-pay-test"),
            webhook_secret: SecretString::from(WEBHOOK_SECRET),
            prices: IndexMap::from([(plan.to_string(), price_id.to_string())]),
            success_url: Url::parse("https://app.example.com/billing/success").unwrap(),
            cancel_url: Url::parse("https://app.example.com/billing/cancel").unwrap(),
        });
        self
    }

    /// Disable the health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}

/// Parse a mock base URL, with the trailing slash URL joins need
fn parse_base(url: &str) -> Url {
    Url::parse(&format!("{url}/")).expect("valid mock URL")
}
