#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod error;
mod relay;
mod verifier;

pub use error::AuthError;
pub use relay::{Collect, MemoryRelay, SessionNotFound, TokenRelay};
pub use verifier::IdentityVerifier;
