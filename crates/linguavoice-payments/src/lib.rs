#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod client;
mod error;
mod types;

pub use client::{CheckoutParams, PaymentsClient};
pub use error::PaymentsError;
pub use types::{CheckoutSession, WebhookEvent, WebhookObject};
