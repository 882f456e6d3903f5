use indexmap::IndexMap;

use linguavoice_config::QuotaConfig;

/// Per-request admission context, derived and discarded per request
#[derive(Debug, Clone)]
pub struct QuotaContext {
    /// Length of the input text in characters
    pub character_count: u64,
    /// Resolved account usage; `None` for anonymous callers
    pub usage: Option<AccountUsage>,
}

/// Usage state resolved from the caller's user record
#[derive(Debug, Clone)]
pub struct AccountUsage {
    /// Monthly character allowance for the caller's plan
    pub plan_ceiling: u64,
    /// Characters already consumed this billing period
    pub characters_used: u64,
}

/// Admission decision for one generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Admit,
    Reject(RejectReason),
}

/// Why a request was turned away before any paid downstream call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Anonymous request larger than the per-request ceiling
    AnonymousLimit,
    /// Authenticated request would overrun the plan's monthly ceiling
    PlanCeiling,
}

impl RejectReason {
    /// Caller-visible rejection message
    pub const fn message(self) -> &'static str {
        match self {
            Self::AnonymousLimit => "anonymous limit exceeded",
            Self::PlanCeiling => "monthly quota exceeded",
        }
    }
}

/// Admission control for the generation pipeline
///
/// Evaluated before any paid external call. Anonymous callers get a fixed
/// per-request ceiling; authenticated callers are checked against their
/// plan's monthly allowance.
#[derive(Debug, Clone)]
pub struct QuotaPolicy {
    anonymous_limit: u64,
    default_plan: String,
    plans: IndexMap<String, u64>,
}

impl QuotaPolicy {
    pub fn from_config(config: &QuotaConfig) -> Self {
        Self {
            anonymous_limit: config.anonymous_limit,
            default_plan: config.default_plan.clone(),
            plans: config.plans.clone(),
        }
    }

    /// Plan assigned to lazily created records
    pub fn default_plan(&self) -> &str {
        &self.default_plan
    }

    /// Monthly ceiling for a plan name
    ///
    /// Unknown plans fall back to the default plan's ceiling, so a record
    /// pointing at a retired plan keeps working rather than locking the
    /// user out.
    pub fn ceiling_for(&self, plan: &str) -> u64 {
        self.plans
            .get(plan)
            .or_else(|| self.plans.get(&self.default_plan))
            .copied()
            .unwrap_or(self.anonymous_limit)
    }

    /// Decide whether a request may proceed to the paid downstream calls
    pub fn evaluate(&self, context: &QuotaContext) -> Decision {
        match &context.usage {
            None => {
                if context.character_count <= self.anonymous_limit {
                    Decision::Admit
                } else {
                    Decision::Reject(RejectReason::AnonymousLimit)
                }
            }
            Some(usage) => {
                if usage.characters_used + context.character_count <= usage.plan_ceiling {
                    Decision::Admit
                } else {
                    Decision::Reject(RejectReason::PlanCeiling)
                }
            }
        }
    }
}
