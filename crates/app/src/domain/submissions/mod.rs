//! Submissions

pub mod data;
pub mod errors;
pub mod service;

pub use errors::SubmissionServiceError;
pub use service::*;
