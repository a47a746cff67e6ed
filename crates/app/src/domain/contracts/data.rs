//! Contract Data

use viscend::{draft::ContractDraft, language::Language};

use crate::domain::contracts::records::ContractId;

/// A contract ready to be stored once its code is verified.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContract {
    pub contract_id: ContractId,
    pub draft: ContractDraft,
    pub language: Language,
    pub document_html: String,
}
