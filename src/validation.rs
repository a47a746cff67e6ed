//! Draft Validation

use thiserror::Error;

use crate::draft::{CommercialField, ContractDraft, InvalidField};

/// Groups of form fields an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGroup {
    /// Name, email, phone and company
    Client,

    /// Service type, name, description and scope
    Project,

    /// Cost, dates and revisions
    Commercial,

    /// Terms agreement
    Terms,
}

/// Reasons a draft cannot leave the form.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Name, email or phone is blank
    #[error("client name, email and phone are required")]
    MissingClientInfo,

    /// Email is not a valid address
    #[error("client email is not a valid address")]
    InvalidEmail,

    /// Service type, project name or description is missing
    #[error("service type, project name and description are required")]
    MissingProjectInfo,

    /// A commercial field has an unusable value
    #[error("{0} has an invalid value")]
    InvalidCommercialTerms(CommercialField),

    /// Terms were not agreed
    #[error("the terms and conditions must be agreed")]
    TermsNotAgreed,
}

impl ValidationError {
    /// The field group the error refers to.
    pub fn group(self) -> FieldGroup {
        match self {
            ValidationError::MissingClientInfo | ValidationError::InvalidEmail => {
                FieldGroup::Client
            }
            ValidationError::MissingProjectInfo => FieldGroup::Project,
            ValidationError::InvalidCommercialTerms(_) => FieldGroup::Commercial,
            ValidationError::TermsNotAgreed => FieldGroup::Terms,
        }
    }
}

impl From<InvalidField> for ValidationError {
    fn from(InvalidField(field): InvalidField) -> Self {
        ValidationError::InvalidCommercialTerms(field)
    }
}

/// Check a draft is complete enough to be previewed and confirmed.
///
/// Groups are checked in form order and the first failing group is reported.
///
/// # Errors
///
/// Returns the [`ValidationError`] of the first failing group.
pub fn validate(draft: &ContractDraft) -> Result<(), ValidationError> {
    if is_blank(&draft.client_name) || is_blank(&draft.client_email) || is_blank(&draft.client_phone)
    {
        return Err(ValidationError::MissingClientInfo);
    }

    if !is_valid_email(&draft.client_email) {
        return Err(ValidationError::InvalidEmail);
    }

    if draft.service_type.is_none()
        || is_blank(&draft.project_name)
        || is_blank(&draft.project_description)
    {
        return Err(ValidationError::MissingProjectInfo);
    }

    draft.project_cost()?;
    draft.start_date()?;
    draft.revisions()?;

    if !draft.terms_agreed {
        return Err(ValidationError::TermsNotAgreed);
    }

    Ok(())
}

/// Syntactic email check: `local@domain.tld` with no whitespace and exactly one `@`.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();

    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();

    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
