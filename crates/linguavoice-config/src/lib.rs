#![allow(clippy::must_use_candidate)]

pub mod accounts;
pub mod auth;
pub mod cors;
mod env;
pub mod health;
mod loader;
pub mod payments;
pub mod quota;
pub mod relay;
pub mod server;
pub mod translation;
pub mod tts;

use serde::Deserialize;

pub use accounts::*;
pub use auth::*;
pub use cors::*;
pub use health::*;
pub use payments::*;
pub use quota::*;
pub use relay::*;
pub use server::*;
pub use translation::*;
pub use tts::*;

/// Top-level Linguavoice configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Hosted identity service configuration
    pub auth: AuthConfig,
    /// Magic-link token relay configuration
    #[serde(default)]
    pub relay: RelayConfig,
    /// Character quota configuration
    #[serde(default)]
    pub quota: QuotaConfig,
    /// Translation provider configuration
    pub translation: TranslationConfig,
    /// Speech-synthesis provider configuration
    pub tts: TtsConfig,
    /// Hosted user record store configuration
    pub accounts: AccountsConfig,
    /// Payment provider configuration (opt-in)
    #[serde(default)]
    pub payments: Option<PaymentsConfig>,
}
