//! VisCend prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    api::{
        ErrorResponse, SendVerificationRequest, SendVerificationResponse, SubmitContractRequest,
        SubmitContractResponse,
    },
    backend::{BackendError, ContractBackend},
    document::{Document, Footer, render},
    draft::{ContractDraft, ServiceType},
    language::{Language, TextDirection},
    notices::{Notice, NoticeKind, NoticeLevel},
    preferences::{FilePreferencesStore, Preferences, PreferencesHandle, PreferencesStore, Theme},
    validation::{FieldGroup, ValidationError, validate},
    verification::{VerificationChallenge, VerificationCode, VerificationError},
    wizard::{Dispatch, Resolution, Step, Wizard, WizardError, WizardSession},
};
