use indexmap::IndexMap;
use serde::Deserialize;

/// Character quota configuration
///
/// Anonymous callers are capped per request; authenticated callers are
/// capped per billing period against their plan's ceiling.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuotaConfig {
    /// Per-request character ceiling for anonymous callers
    #[serde(default = "default_anonymous_limit")]
    pub anonymous_limit: u64,

    /// Plan assigned to lazily created user records
    #[serde(default = "default_plan")]
    pub default_plan: String,

    /// Monthly character ceilings keyed by plan name
    #[serde(default = "default_plans")]
    pub plans: IndexMap<String, u64>,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            anonymous_limit: default_anonymous_limit(),
            default_plan: default_plan(),
            plans: default_plans(),
        }
    }
}

const fn default_anonymous_limit() -> u64 {
    500
}

fn default_plan() -> String {
    "free".to_string()
}

fn default_plans() -> IndexMap<String, u64> {
    IndexMap::from([("free".to_string(), 20_000)])
}
