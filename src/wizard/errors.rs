//! Wizard Errors

use thiserror::Error;

use crate::{
    notices::{Notice, NoticeKind},
    validation::ValidationError,
    wizard::{Action, StepKind},
};

/// Reasons a wizard action was refused. The wizard is unchanged after any of them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WizardError {
    /// A dispatch is still outstanding
    #[error("a request is already in flight")]
    Busy,

    /// The action does not apply to the current step
    #[error("cannot {action} during {step}")]
    NotAllowed {
        /// Attempted action
        action: Action,

        /// Current step
        step: StepKind,
    },

    /// The draft is incomplete
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No verification code was entered
    #[error("no verification code entered")]
    MissingCode,

    /// There is no dispatch to resolve
    #[error("no request is in flight")]
    NothingPending,

    /// The outcome does not belong to the outstanding dispatch
    #[error("outcome does not match the request in flight")]
    UnexpectedResolution,
}

impl WizardError {
    /// User-visible notice for errors the user can act on.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            WizardError::Busy => Some(Notice::new(NoticeKind::RequestPending)),
            WizardError::Validation(error) => Some(Notice::new(NoticeKind::Validation(*error))),
            WizardError::MissingCode => Some(Notice::new(NoticeKind::MissingCode)),
            WizardError::NotAllowed { .. }
            | WizardError::NothingPending
            | WizardError::UnexpectedResolution => None,
        }
    }
}
