//! Verification Challenges

pub mod code;
pub mod errors;
pub(crate) mod repository;
pub mod service;

pub use errors::ChallengesServiceError;
pub use service::*;
