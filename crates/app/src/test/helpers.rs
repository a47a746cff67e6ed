//! Test Helpers

use viscend::draft::{ContractDraft, ServiceType};

/// A draft that passes validation, addressed to `email`.
pub(crate) fn draft(email: &str) -> ContractDraft {
    ContractDraft {
        client_name: "Amal Haddad".to_string(),
        client_email: email.to_string(),
        client_phone: "+966 50 000 0000".to_string(),
        client_company: "Haddad Trading".to_string(),
        service_type: Some(ServiceType::Web),
        project_name: "Storefront".to_string(),
        project_description: "Bilingual storefront with checkout".to_string(),
        project_cost: "12000".to_string(),
        start_date: "2026-11-01".to_string(),
        terms_agreed: true,
        ..ContractDraft::default()
    }
}
