//! Wizard Session

use crate::{
    backend::ContractBackend,
    wizard::{Dispatch, Notices, Resolution, Wizard, WizardError},
};

/// A [`Wizard`] driven against a [`ContractBackend`].
///
/// Each network-bound action runs its dispatch to completion before returning,
/// so a session never has more than one request in flight.
#[derive(Debug)]
pub struct WizardSession<B> {
    wizard: Wizard,
    backend: B,
}

impl<B: ContractBackend> WizardSession<B> {
    /// New session around a wizard.
    pub fn new(wizard: Wizard, backend: B) -> Self {
        Self { wizard, backend }
    }

    /// The wizard.
    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    /// The wizard, for local actions (draft edits, submit, edit, back, reset).
    pub fn wizard_mut(&mut self) -> &mut Wizard {
        &mut self.wizard
    }

    /// The backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Request a code from the preview.
    ///
    /// # Errors
    ///
    /// Returns a [`WizardError`] when the wizard refuses the action.
    pub async fn confirm(&mut self) -> Result<Notices, WizardError> {
        let dispatch = self.wizard.confirm()?;

        self.run(dispatch).await
    }

    /// Request a new code.
    ///
    /// # Errors
    ///
    /// Returns a [`WizardError`] when the wizard refuses the action.
    pub async fn resend(&mut self) -> Result<Notices, WizardError> {
        let dispatch = self.wizard.resend()?;

        self.run(dispatch).await
    }

    /// Submit the entered code and the draft.
    ///
    /// # Errors
    ///
    /// Returns a [`WizardError`] when the wizard refuses the action.
    pub async fn verify_and_submit(&mut self) -> Result<Notices, WizardError> {
        let dispatch = self.wizard.verify_and_submit()?;

        self.run(dispatch).await
    }

    async fn run(&mut self, dispatch: Dispatch) -> Result<Notices, WizardError> {
        let resolution = match dispatch {
            Dispatch::SendVerification(request) => {
                Resolution::Issued(self.backend.send_verification(request).await)
            }
            Dispatch::Submit(request) => {
                Resolution::Submitted(self.backend.submit_contract(request).await)
            }
        };

        self.wizard.resolve(resolution)
    }
}
