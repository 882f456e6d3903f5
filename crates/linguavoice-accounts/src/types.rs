use serde::{Deserialize, Serialize};

/// Persistent usage/plan record for one user
///
/// Owned by the hosted record store; this backend only reads it for
/// admission decisions and writes usage increments and plan changes.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    /// Stable user identifier from the identity service
    pub user_id: String,
    /// Email address, when known
    #[serde(default)]
    pub email: Option<String>,
    /// Plan name; keys into the configured quota plan table
    pub plan: String,
    /// Characters consumed in the current billing period
    #[serde(default)]
    pub characters_used: u64,
}

/// Body for lazily creating a record on first authenticated request
#[derive(Debug, Serialize)]
pub(crate) struct CreateRecordRequest<'a> {
    pub user_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    pub plan: &'a str,
}

/// Body for incrementing the usage counter
#[derive(Debug, Serialize)]
pub(crate) struct AddUsageRequest {
    pub delta: u64,
}

/// Body for switching a record to a different plan
#[derive(Debug, Serialize)]
pub(crate) struct SetPlanRequest<'a> {
    pub plan: &'a str,
}
