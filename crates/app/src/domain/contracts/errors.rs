//! Contracts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;
use viscend::verification::VerificationError;

#[derive(Debug, Error)]
pub enum ContractsServiceError {
    #[error("Invalid verification code")]
    InvalidCode,

    #[error("Verification code expired")]
    ExpiredCode,

    #[error("contract not found")]
    NotFound,

    #[error("contract already exists")]
    AlreadyExists,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<VerificationError> for ContractsServiceError {
    fn from(error: VerificationError) -> Self {
        match error {
            VerificationError::InvalidCode => Self::InvalidCode,
            VerificationError::ExpiredCode => Self::ExpiredCode,
        }
    }
}

impl From<Error> for ContractsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
