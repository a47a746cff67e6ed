//! Contract Requests

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use viscend::{
    draft::{ContractDraft, DEFAULT_REVISIONS, ServiceType, UnknownServiceType},
    language::Language,
};

/// Site language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SiteLanguage {
    /// English
    #[default]
    En,

    /// Arabic
    Ar,
}

impl From<SiteLanguage> for Language {
    fn from(language: SiteLanguage) -> Self {
        match language {
            SiteLanguage::En => Language::En,
            SiteLanguage::Ar => Language::Ar,
        }
    }
}

impl From<Language> for SiteLanguage {
    fn from(language: Language) -> Self {
        match language {
            Language::En => SiteLanguage::En,
            Language::Ar => SiteLanguage::Ar,
        }
    }
}

/// Contract fields as entered in the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ContractFields {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub client_company: String,

    /// One of `studio`, `web` or `marketing`; blank when not chosen
    pub service_type: Option<String>,

    pub project_name: String,
    pub project_description: String,
    pub features: String,
    pub limitations: String,
    pub deliverables: String,
    pub project_duration: String,

    /// Total cost in dollars, as typed
    pub project_cost: String,

    /// `YYYY-MM-DD`
    pub start_date: String,

    pub payment_terms: String,
    pub revisions: String,
    pub additional_terms: String,
    pub terms_agreed: bool,
}

impl Default for ContractFields {
    fn default() -> Self {
        ContractDraft::default().into()
    }
}

impl TryFrom<ContractFields> for ContractDraft {
    type Error = UnknownServiceType;

    fn try_from(fields: ContractFields) -> Result<Self, Self::Error> {
        let service_type = match fields.service_type.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(value.parse::<ServiceType>()?),
        };

        Ok(ContractDraft {
            client_name: fields.client_name,
            client_email: fields.client_email,
            client_phone: fields.client_phone,
            client_company: fields.client_company,
            service_type,
            project_name: fields.project_name,
            project_description: fields.project_description,
            features: fields.features,
            limitations: fields.limitations,
            deliverables: fields.deliverables,
            project_duration: fields.project_duration,
            project_cost: fields.project_cost,
            start_date: fields.start_date,
            payment_terms: fields.payment_terms,
            revisions: fields.revisions,
            additional_terms: fields.additional_terms,
            terms_agreed: fields.terms_agreed,
        })
    }
}

impl From<ContractDraft> for ContractFields {
    fn from(draft: ContractDraft) -> Self {
        ContractFields {
            client_name: draft.client_name,
            client_email: draft.client_email,
            client_phone: draft.client_phone,
            client_company: draft.client_company,
            service_type: draft.service_type.map(|service| service.as_str().to_string()),
            project_name: draft.project_name,
            project_description: draft.project_description,
            features: draft.features,
            limitations: draft.limitations,
            deliverables: draft.deliverables,
            project_duration: draft.project_duration,
            project_cost: draft.project_cost,
            start_date: draft.start_date,
            payment_terms: draft.payment_terms,
            revisions: draft.revisions,
            additional_terms: draft.additional_terms,
            terms_agreed: draft.terms_agreed,
        }
    }
}

/// Send Verification Request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SendVerificationRequest {
    /// Address the code is sent to
    pub email: String,

    /// Language of the verification email
    #[serde(default)]
    pub language: SiteLanguage,
}

/// Submit Contract Request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitContractRequest {
    /// Confirmed contract fields
    #[serde(flatten)]
    pub fields: ContractFields,

    /// Code from the verification email
    pub verification_code: String,

    /// Language the contract was confirmed in
    #[serde(default)]
    pub language: SiteLanguage,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn submit_request_reads_the_flat_form_payload() -> TestResult {
        let request: SubmitContractRequest = serde_json::from_value(json!({
            "clientName": "Nour",
            "clientEmail": "nour@example.com",
            "serviceType": "web",
            "termsAgreed": true,
            "verificationCode": "654321",
            "language": "ar",
        }))?;

        let draft = ContractDraft::try_from(request.fields)?;

        assert_eq!(draft.client_name, "Nour");
        assert_eq!(draft.service_type, Some(ServiceType::Web));
        assert_eq!(draft.revisions, DEFAULT_REVISIONS);
        assert_eq!(request.verification_code, "654321");
        assert_eq!(request.language, SiteLanguage::Ar);

        Ok(())
    }

    #[test]
    fn blank_service_type_is_not_chosen() -> TestResult {
        let fields = ContractFields {
            service_type: Some("  ".to_string()),
            ..ContractFields::default()
        };

        assert_eq!(ContractDraft::try_from(fields)?.service_type, None);

        Ok(())
    }

    #[test]
    fn unknown_service_type_is_rejected() {
        let fields = ContractFields {
            service_type: Some("print".to_string()),
            ..ContractFields::default()
        };

        assert!(
            ContractDraft::try_from(fields).is_err(),
            "unknown service type should not convert"
        );
    }

    #[test]
    fn language_defaults_to_english() -> TestResult {
        let request: SendVerificationRequest =
            serde_json::from_value(json!({ "email": "a@b.com" }))?;

        assert_eq!(Language::from(request.language), Language::En);

        Ok(())
    }
}
