//! Submission Data

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::contracts::records::ContractId;

/// When an issued code is disclosed in the response instead of only by email.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DevCodePolicy {
    /// Never disclose codes
    Never,

    /// Disclose codes only when email delivery failed
    #[default]
    OnDeliveryFailure,

    /// Always disclose codes
    Always,
}

impl DevCodePolicy {
    /// Whether to disclose the code given the delivery outcome.
    pub fn discloses(self, email_sent: bool) -> bool {
        match self {
            Self::Never => false,
            Self::OnDeliveryFailure => !email_sent,
            Self::Always => true,
        }
    }
}

/// Outcome of issuing a verification code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationIssued {
    pub email_sent: bool,
    /// A configured mailer tried to deliver the code and failed.
    pub delivery_failed: bool,
    pub dev_code: Option<String>,
}

/// A stored contract and where to fetch its document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCreated {
    pub contract_id: ContractId,
    pub document_url: String,
}

/// Submission service settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionSettings {
    /// Public base URL document links are built from.
    pub public_base_url: String,

    /// Code disclosure policy.
    pub dev_code_policy: DevCodePolicy,
}

impl SubmissionSettings {
    /// Public URL of the printable document for `contract`.
    pub fn document_url(&self, contract: ContractId) -> String {
        format!(
            "{}/contracts/{contract}/document",
            self.public_base_url.trim_end_matches('/')
        )
    }
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        Self {
            public_base_url: "http://localhost:8698".to_string(),
            dev_code_policy: DevCodePolicy::default(),
        }
    }
}
