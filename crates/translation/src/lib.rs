#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod client;
mod error;

pub use client::TranslationClient;
pub use error::TranslationError;
