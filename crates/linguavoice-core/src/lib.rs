#![allow(clippy::must_use_candidate)]

mod caller;
mod error;

pub use caller::{Caller, VerifiedUser};
pub use error::HttpError;
