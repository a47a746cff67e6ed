//! Submission service errors.

use thiserror::Error;
use viscend::validation::ValidationError;

use crate::domain::{challenges::ChallengesServiceError, contracts::ContractsServiceError};

#[derive(Debug, Error)]
pub enum SubmissionServiceError {
    #[error("invalid email address")]
    InvalidEmail,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid verification code")]
    InvalidCode,

    #[error("Verification code expired")]
    ExpiredCode,

    #[error("contract not found")]
    NotFound,

    #[error("failed to issue verification code")]
    Challenges(#[source] ChallengesServiceError),

    #[error("failed to store contract")]
    Contracts(#[source] ContractsServiceError),
}

impl From<ChallengesServiceError> for SubmissionServiceError {
    fn from(error: ChallengesServiceError) -> Self {
        Self::Challenges(error)
    }
}

impl From<ContractsServiceError> for SubmissionServiceError {
    fn from(error: ContractsServiceError) -> Self {
        match error {
            ContractsServiceError::InvalidCode => Self::InvalidCode,
            ContractsServiceError::ExpiredCode => Self::ExpiredCode,
            ContractsServiceError::NotFound => Self::NotFound,
            other => Self::Contracts(other),
        }
    }
}
