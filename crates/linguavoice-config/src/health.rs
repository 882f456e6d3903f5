use serde::Deserialize;

/// Health check endpoint configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HealthConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/health".to_string(),
        }
    }
}

const fn default_enabled() -> bool {
    true
}

fn default_path() -> String {
    "/health".to_string()
}
