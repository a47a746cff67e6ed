//! Contract Draft
//!
//! The structured form data a client fills in before confirming a contract.
//! Text-entry fields hold the raw input; typed accessors parse them on demand.

use std::{fmt, str::FromStr};

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::language::Language;

/// Number of revisions offered when the client does not choose otherwise.
pub const DEFAULT_REVISIONS: &str = "3";

/// Service line the contract is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    /// Visual production (studio)
    Studio,

    /// Web development
    Web,

    /// Digital marketing
    Marketing,
}

impl ServiceType {
    /// Human readable label in the given language.
    pub fn label(self, language: Language) -> &'static str {
        match self {
            ServiceType::Studio => {
                language.pick("Visual Production (Studio)", "الإنتاج المرئي (ستوديو)")
            }
            ServiceType::Web => language.pick("Web Development", "تطوير المواقع"),
            ServiceType::Marketing => language.pick("Digital Marketing", "التسويق الرقمي"),
        }
    }

    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceType::Studio => "studio",
            ServiceType::Web => "web",
            ServiceType::Marketing => "marketing",
        }
    }
}

/// Error returned when a service type is not offered.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown service type \"{0}\"")]
pub struct UnknownServiceType(pub String);

impl FromStr for ServiceType {
    type Err = UnknownServiceType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "studio" => Ok(ServiceType::Studio),
            "web" => Ok(ServiceType::Web),
            "marketing" => Ok(ServiceType::Marketing),
            _ => Err(UnknownServiceType(value.to_string())),
        }
    }
}

/// Commercial fields that carry a typed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommercialField {
    /// Total project cost
    ProjectCost,

    /// Expected start date
    StartDate,

    /// Number of included revisions
    Revisions,
}

impl fmt::Display for CommercialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CommercialField::ProjectCost => "projectCost",
            CommercialField::StartDate => "startDate",
            CommercialField::Revisions => "revisions",
        })
    }
}

/// A commercial field could not be parsed into its typed value.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("{0} has an invalid value")]
pub struct InvalidField(pub CommercialField);

/// Contract Draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContractDraft {
    /// Client full name
    pub client_name: String,

    /// Client email, the address the verification code is sent to
    pub client_email: String,

    /// Client phone number
    pub client_phone: String,

    /// Client company (optional)
    pub client_company: String,

    /// Service line
    #[serde(deserialize_with = "blank_as_none")]
    pub service_type: Option<ServiceType>,

    /// Project name
    pub project_name: String,

    /// Project description
    pub project_description: String,

    /// Included features (optional)
    pub features: String,

    /// Known limitations (optional)
    pub limitations: String,

    /// Deliverables (optional)
    pub deliverables: String,

    /// Project duration, free text
    pub project_duration: String,

    /// Total cost, raw input
    pub project_cost: String,

    /// Start date, raw `YYYY-MM-DD` input
    pub start_date: String,

    /// Payment terms, free text
    pub payment_terms: String,

    /// Included revisions, raw input
    pub revisions: String,

    /// Extra terms appended to the standard ones (optional)
    pub additional_terms: String,

    /// Whether the client agreed to the terms
    pub terms_agreed: bool,
}

impl Default for ContractDraft {
    fn default() -> Self {
        Self {
            client_name: String::new(),
            client_email: String::new(),
            client_phone: String::new(),
            client_company: String::new(),
            service_type: None,
            project_name: String::new(),
            project_description: String::new(),
            features: String::new(),
            limitations: String::new(),
            deliverables: String::new(),
            project_duration: String::new(),
            project_cost: String::new(),
            start_date: String::new(),
            payment_terms: String::new(),
            revisions: DEFAULT_REVISIONS.to_string(),
            additional_terms: String::new(),
            terms_agreed: false,
        }
    }
}

impl ContractDraft {
    /// The client email trimmed and lower-cased, as used for verification lookups.
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.client_email)
    }

    /// Parsed project cost; `None` when left blank.
    ///
    /// # Errors
    ///
    /// Returns an error when the cost is not a non-negative number.
    pub fn project_cost(&self) -> Result<Option<Decimal>, InvalidField> {
        parse_optional(&self.project_cost, |value| {
            Decimal::from_str(value)
                .ok()
                .filter(|cost| *cost >= Decimal::ZERO)
                .ok_or(InvalidField(CommercialField::ProjectCost))
        })
    }

    /// Parsed start date (`YYYY-MM-DD`); `None` when left blank.
    ///
    /// # Errors
    ///
    /// Returns an error when the date cannot be parsed.
    pub fn start_date(&self) -> Result<Option<Date>, InvalidField> {
        parse_optional(&self.start_date, |value| {
            value
                .parse::<Date>()
                .map_err(|_ignored| InvalidField(CommercialField::StartDate))
        })
    }

    /// Parsed number of revisions; `None` when left blank.
    ///
    /// # Errors
    ///
    /// Returns an error when the value is not a non-negative integer.
    pub fn revisions(&self) -> Result<Option<u32>, InvalidField> {
        parse_optional(&self.revisions, |value| {
            value
                .parse::<u32>()
                .map_err(|_ignored| InvalidField(CommercialField::Revisions))
        })
    }
}

/// Trim and lower-case an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn parse_optional<T>(
    raw: &str,
    parse: impl FnOnce(&str) -> Result<T, InvalidField>,
) -> Result<Option<T>, InvalidField> {
    let value = raw.trim();

    if value.is_empty() {
        return Ok(None);
    }

    parse(value).map(Some)
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<ServiceType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;

    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => ServiceType::deserialize(serde::de::value::StrDeserializer::new(value))
            .map(Some),
    }
}
