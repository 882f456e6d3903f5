use std::net::SocketAddr;

use serde::Deserialize;
use url::Url;

use crate::{cors::CorsConfig, health::HealthConfig};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    /// Externally visible base URL, embedded in relay redirect targets
    #[serde(default = "default_public_url")]
    pub public_url: Url,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub cors: Option<CorsConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: None,
            public_url: default_public_url(),
            health: HealthConfig::default(),
            cors: None,
        }
    }
}

fn default_public_url() -> Url {
    Url::parse("http://localhost:3000").expect("must be valid URL")
}
