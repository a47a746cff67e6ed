//! Contract Backend
//!
//! The server side of the wizard: code issuance and verified submission.

use thiserror::Error;

use crate::api::{
    SendVerificationRequest, SendVerificationResponse, SubmitContractRequest,
    SubmitContractResponse,
};

/// Backend call failures as seen by the wizard.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    /// The code does not match or was already used
    #[error("Invalid verification code")]
    InvalidCode,

    /// The code expired
    #[error("Verification code expired")]
    ExpiredCode,

    /// The backend refused the request
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The backend could not be reached or answered unexpectedly
    #[error("transport error: {0}")]
    Transport(String),
}

/// Contract backend used by the wizard.
pub trait ContractBackend {
    /// Issue a verification code for an email address.
    async fn send_verification(
        &self,
        request: SendVerificationRequest,
    ) -> Result<SendVerificationResponse, BackendError>;

    /// Verify the code and store the contract.
    async fn submit_contract(
        &self,
        request: SubmitContractRequest,
    ) -> Result<SubmitContractResponse, BackendError>;
}
