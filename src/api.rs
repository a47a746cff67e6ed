//! Wire Types
//!
//! JSON bodies exchanged between the wizard and the contract backend.

use serde::{Deserialize, Serialize};

use crate::{draft::ContractDraft, language::Language};

/// Error body for a code that does not match or was already used.
pub const INVALID_CODE_MESSAGE: &str = "Invalid verification code";

/// Error body for a code checked after its expiry.
pub const EXPIRED_CODE_MESSAGE: &str = "Verification code expired";

/// Send Verification Request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendVerificationRequest {
    /// Address to send the code to
    pub email: String,

    /// Language of the verification email
    #[serde(default)]
    pub language: Language,
}

/// Send Verification Response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendVerificationResponse {
    /// Whether a code was issued
    pub success: bool,

    /// Whether the email was delivered
    pub email_sent: bool,

    /// Code disclosed through the development fallback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_code: Option<String>,
}

/// Submit Contract Request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitContractRequest {
    /// Confirmed draft
    #[serde(flatten)]
    pub draft: ContractDraft,

    /// Code the client entered
    pub verification_code: String,

    /// Language the contract was confirmed in
    #[serde(default)]
    pub language: Language,
}

/// Submit Contract Response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitContractResponse {
    /// Whether the contract was stored
    pub success: bool,

    /// Identifier of the stored contract
    pub contract_id: String,

    /// Location of the printable contract document
    pub pdf_url: String,
}

/// Error Response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human readable error
    pub error: String,
}

impl ErrorResponse {
    /// Error body with the given message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
