//! Contract Wizard
//!
//! A sans-IO state machine driving a contract from form entry to a stored
//! record: `Form -> Preview -> Verification -> Success`.
//!
//! Actions that need the backend return a [`Dispatch`] describing the request
//! and mark the wizard as busy. The caller performs the request and hands the
//! outcome back through [`Wizard::resolve`]. While a dispatch is outstanding
//! every other action fails with [`WizardError::Busy`].
//!
//! [`WizardSession`] pairs a wizard with a [`ContractBackend`](crate::backend::ContractBackend)
//! and runs the dispatch round trip for you.

use std::fmt;

use jiff::civil::Date;
use smallvec::{SmallVec, smallvec};

use crate::{
    api::{
        SendVerificationRequest, SendVerificationResponse, SubmitContractRequest,
        SubmitContractResponse,
    },
    backend::BackendError,
    document::{Document, Footer, render},
    draft::ContractDraft,
    language::Language,
    notices::{Notice, NoticeKind},
    validation::validate,
};

mod errors;
mod session;

pub use errors::WizardError;
pub use session::WizardSession;

/// Notices raised by a single wizard action.
pub type Notices = SmallVec<[Notice; 2]>;

/// Wizard step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Filling in the draft
    Form,

    /// Reviewing the rendered draft
    Preview,

    /// Waiting for the emailed code
    Verification,

    /// Contract stored
    Success {
        /// Identifier of the stored contract
        contract_id: String,

        /// Location of the printable contract document
        document_url: String,
    },
}

impl Step {
    /// Step name without payload.
    pub fn kind(&self) -> StepKind {
        match self {
            Step::Form => StepKind::Form,
            Step::Preview => StepKind::Preview,
            Step::Verification => StepKind::Verification,
            Step::Success { .. } => StepKind::Success,
        }
    }
}

/// Step name without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Form
    Form,

    /// Preview
    Preview,

    /// Verification
    Verification,

    /// Success
    Success,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StepKind::Form => "form",
            StepKind::Preview => "preview",
            StepKind::Verification => "verification",
            StepKind::Success => "success",
        })
    }
}

/// Wizard actions, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Edit the draft
    EditDraft,

    /// Form to preview
    Submit,

    /// Preview back to form
    Edit,

    /// Request a code from the preview
    Confirm,

    /// Request a new code
    Resend,

    /// Verification back to preview
    Back,

    /// Enter the code
    EnterCode,

    /// Submit the code
    VerifyAndSubmit,

    /// Start over
    Reset,

    /// Change the contract language
    SwitchLanguage,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::EditDraft => "edit draft",
            Action::Submit => "submit",
            Action::Edit => "edit",
            Action::Confirm => "confirm",
            Action::Resend => "resend",
            Action::Back => "back",
            Action::EnterCode => "enter code",
            Action::VerifyAndSubmit => "verify and submit",
            Action::Reset => "reset",
            Action::SwitchLanguage => "switch language",
        })
    }
}

/// A backend request the caller must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Issue a verification code
    SendVerification(SendVerificationRequest),

    /// Verify the code and store the contract
    Submit(SubmitContractRequest),
}

/// Outcome of a [`Dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Outcome of [`Dispatch::SendVerification`]
    Issued(Result<SendVerificationResponse, BackendError>),

    /// Outcome of [`Dispatch::Submit`]
    Submitted(Result<SubmitContractResponse, BackendError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Issue,
    Submit,
}

/// Contract Wizard
#[derive(Debug, Clone)]
pub struct Wizard {
    step: Step,
    draft: ContractDraft,
    language: Language,
    code_input: String,
    dev_code: Option<String>,
    pending: Option<Pending>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl Wizard {
    /// New wizard on an empty form.
    pub fn new(language: Language) -> Self {
        Self::with_draft(ContractDraft::default(), language)
    }

    /// New wizard on a pre-filled form.
    pub fn with_draft(draft: ContractDraft, language: Language) -> Self {
        Self {
            step: Step::Form,
            draft,
            language,
            code_input: String::new(),
            dev_code: None,
            pending: None,
        }
    }

    /// Current step.
    pub fn step(&self) -> &Step {
        &self.step
    }

    /// Current draft.
    pub fn draft(&self) -> &ContractDraft {
        &self.draft
    }

    /// Mutable access to the draft, only while on the form.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::Busy`] or [`WizardError::NotAllowed`] outside the form.
    pub fn draft_mut(&mut self) -> Result<&mut ContractDraft, WizardError> {
        self.ensure(Action::EditDraft, StepKind::Form)?;

        Ok(&mut self.draft)
    }

    /// Display language.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Switch the contract language. The language is fixed once the form is
    /// submitted, so the confirmed preview and the stored document agree.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::Busy`] or [`WizardError::NotAllowed`] outside the form.
    pub fn set_language(&mut self, language: Language) -> Result<(), WizardError> {
        self.ensure(Action::SwitchLanguage, StepKind::Form)?;

        self.language = language;

        Ok(())
    }

    /// Code typed in so far.
    pub fn code_input(&self) -> &str {
        &self.code_input
    }

    /// Code disclosed by the backend for the current challenge, if any.
    pub fn dev_code(&self) -> Option<&str> {
        self.dev_code.as_deref()
    }

    /// Whether a dispatch is outstanding.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Render the preview document for the current draft.
    pub fn preview(&self, issued_on: Date) -> Document {
        render(&self.draft, self.language, &Footer::Preview { issued_on })
    }

    /// Move from the form to the preview when the draft is valid.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::Validation`] and stays on the form when the draft is incomplete.
    pub fn submit(&mut self) -> Result<(), WizardError> {
        self.ensure(Action::Submit, StepKind::Form)?;

        validate(&self.draft)?;

        self.step = Step::Preview;

        Ok(())
    }

    /// Go back from the preview to the form, keeping the draft.
    ///
    /// # Errors
    ///
    /// Returns an error outside the preview or while busy.
    pub fn edit(&mut self) -> Result<(), WizardError> {
        self.ensure(Action::Edit, StepKind::Preview)?;

        self.step = Step::Form;

        Ok(())
    }

    /// Request a verification code for the draft email.
    ///
    /// # Errors
    ///
    /// Returns an error outside the preview or while busy.
    pub fn confirm(&mut self) -> Result<Dispatch, WizardError> {
        self.ensure(Action::Confirm, StepKind::Preview)?;

        Ok(self.dispatch_issue())
    }

    /// Request a new code, discarding any code shown for the previous one.
    ///
    /// # Errors
    ///
    /// Returns an error outside verification or while busy.
    pub fn resend(&mut self) -> Result<Dispatch, WizardError> {
        self.ensure(Action::Resend, StepKind::Verification)?;

        self.dev_code = None;
        self.code_input.clear();

        Ok(self.dispatch_issue())
    }

    /// Go back from verification to the preview.
    ///
    /// # Errors
    ///
    /// Returns an error outside verification or while busy.
    pub fn back(&mut self) -> Result<(), WizardError> {
        self.ensure(Action::Back, StepKind::Verification)?;

        self.code_input.clear();
        self.step = Step::Preview;

        Ok(())
    }

    /// Set the code input.
    ///
    /// # Errors
    ///
    /// Returns an error outside verification or while busy.
    pub fn set_code(&mut self, code: impl Into<String>) -> Result<(), WizardError> {
        self.ensure(Action::EnterCode, StepKind::Verification)?;

        self.code_input = code.into();

        Ok(())
    }

    /// Submit the draft with the entered code.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::MissingCode`] when no code was entered, or an
    /// error outside verification or while busy.
    pub fn verify_and_submit(&mut self) -> Result<Dispatch, WizardError> {
        self.ensure(Action::VerifyAndSubmit, StepKind::Verification)?;

        let code = self.code_input.trim();

        if code.is_empty() {
            return Err(WizardError::MissingCode);
        }

        let request = SubmitContractRequest {
            draft: self.draft.clone(),
            verification_code: code.to_string(),
            language: self.language,
        };

        self.pending = Some(Pending::Submit);

        Ok(Dispatch::Submit(request))
    }

    /// Start a new contract from the success step.
    ///
    /// # Errors
    ///
    /// Returns an error outside the success step.
    pub fn reset(&mut self) -> Result<(), WizardError> {
        self.ensure(Action::Reset, StepKind::Success)?;

        *self = Self::new(self.language);

        Ok(())
    }

    /// Complete the outstanding dispatch.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::NothingPending`] when no dispatch is outstanding and
    /// [`WizardError::UnexpectedResolution`] when the outcome is for the other
    /// kind of request; the wizard is left unchanged in both cases.
    pub fn resolve(&mut self, resolution: Resolution) -> Result<Notices, WizardError> {
        let pending = self.pending.ok_or(WizardError::NothingPending)?;

        match (pending, resolution) {
            (Pending::Issue, Resolution::Issued(outcome)) => {
                self.pending = None;

                Ok(self.resolve_issue(outcome))
            }
            (Pending::Submit, Resolution::Submitted(outcome)) => {
                self.pending = None;

                Ok(self.resolve_submit(outcome))
            }
            _ => Err(WizardError::UnexpectedResolution),
        }
    }

    fn ensure(&self, action: Action, expected: StepKind) -> Result<(), WizardError> {
        if self.is_busy() {
            return Err(WizardError::Busy);
        }

        let step = self.step.kind();

        if step != expected {
            return Err(WizardError::NotAllowed { action, step });
        }

        Ok(())
    }

    fn dispatch_issue(&mut self) -> Dispatch {
        self.pending = Some(Pending::Issue);

        Dispatch::SendVerification(SendVerificationRequest {
            email: self.draft.client_email.trim().to_string(),
            language: self.language,
        })
    }

    fn resolve_issue(
        &mut self,
        outcome: Result<SendVerificationResponse, BackendError>,
    ) -> Notices {
        let response = match outcome {
            Ok(response) if response.success => response,
            Ok(_) | Err(_) => return smallvec![Notice::new(NoticeKind::SendFailed)],
        };

        let mut notices = Notices::new();

        notices.push(Notice::new(if response.email_sent {
            NoticeKind::CodeSent
        } else {
            NoticeKind::CodeReady
        }));

        if let Some(code) = &response.dev_code {
            notices.push(Notice::new(NoticeKind::DevCode(code.clone())));
        }

        self.dev_code = response.dev_code;
        self.code_input.clear();
        self.step = Step::Verification;

        notices
    }

    fn resolve_submit(&mut self, outcome: Result<SubmitContractResponse, BackendError>) -> Notices {
        self.code_input.clear();

        let kind = match outcome {
            Ok(response) if response.success => {
                self.dev_code = None;
                self.step = Step::Success {
                    contract_id: response.contract_id,
                    document_url: response.pdf_url,
                };

                NoticeKind::ContractCreated
            }
            Err(BackendError::InvalidCode) => NoticeKind::InvalidCode,
            Err(BackendError::ExpiredCode) => NoticeKind::ExpiredCode,
            Ok(_) | Err(BackendError::Rejected(_) | BackendError::Transport(_)) => {
                NoticeKind::SubmitFailed
            }
        };

        smallvec![Notice::new(kind)]
    }
}
