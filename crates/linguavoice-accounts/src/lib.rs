#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

pub mod client;
pub mod error;
pub mod quota;
pub mod recorder;
pub mod types;

pub use client::RecordStoreClient;
pub use error::AccountsError;
pub use quota::{AccountUsage, Decision, QuotaContext, QuotaPolicy, RejectReason};
pub use recorder::{UsageDelta, UsageRecorder};
pub use types::UserRecord;
