//! Contract Records

use jiff::Timestamp;
use serde::Serialize;
use viscend::{draft::ContractDraft, language::Language};

use crate::uuids::TypedUuid;

/// Contract identifier
pub type ContractId = TypedUuid<ContractRecord>;

/// Contract Record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractRecord {
    /// Contract identifier, also printed in the document footer.
    pub contract_id: ContractId,

    /// Normalized email the verification code was issued to.
    pub client_email: String,

    /// Draft exactly as confirmed by the client.
    pub draft: ContractDraft,

    /// Language the contract was confirmed in.
    pub language: Language,

    /// Final rendered document.
    pub document_html: String,

    /// Creation timestamp.
    pub created_at: Timestamp,
}
