//! In-process backend.

use std::sync::Arc;

use jiff::Timestamp;
use viscend::{
    api::{
        SendVerificationRequest, SendVerificationResponse, SubmitContractRequest,
        SubmitContractResponse,
    },
    backend::{BackendError, ContractBackend},
};

use crate::domain::submissions::{SubmissionService, SubmissionServiceError};

/// Source of the current time.
pub type Clock = Arc<dyn Fn() -> Timestamp + Send + Sync>;

/// Contract backend calling a [`SubmissionService`] directly.
#[derive(Clone)]
pub struct LocalContractBackend {
    submissions: Arc<dyn SubmissionService>,
    clock: Clock,
}

impl std::fmt::Debug for LocalContractBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalContractBackend").finish_non_exhaustive()
    }
}

impl LocalContractBackend {
    /// Backend using the system clock.
    #[must_use]
    pub fn new(submissions: Arc<dyn SubmissionService>) -> Self {
        Self::with_clock(submissions, Arc::new(Timestamp::now))
    }

    /// Backend reading time from `clock`.
    #[must_use]
    pub fn with_clock(submissions: Arc<dyn SubmissionService>, clock: Clock) -> Self {
        Self { submissions, clock }
    }
}

impl ContractBackend for LocalContractBackend {
    async fn send_verification(
        &self,
        request: SendVerificationRequest,
    ) -> Result<SendVerificationResponse, BackendError> {
        let issued = self
            .submissions
            .send_verification(request.email, request.language, (self.clock)())
            .await
            .map_err(into_backend_error)?;

        Ok(SendVerificationResponse {
            success: true,
            email_sent: issued.email_sent,
            dev_code: issued.dev_code,
        })
    }

    async fn submit_contract(
        &self,
        request: SubmitContractRequest,
    ) -> Result<SubmitContractResponse, BackendError> {
        let created = self
            .submissions
            .submit(
                request.draft,
                request.verification_code,
                request.language,
                (self.clock)(),
            )
            .await
            .map_err(into_backend_error)?;

        Ok(SubmitContractResponse {
            success: true,
            contract_id: created.contract_id.to_string(),
            pdf_url: created.document_url,
        })
    }
}

fn into_backend_error(error: SubmissionServiceError) -> BackendError {
    match error {
        SubmissionServiceError::InvalidCode => BackendError::InvalidCode,
        SubmissionServiceError::ExpiredCode => BackendError::ExpiredCode,
        SubmissionServiceError::InvalidEmail
        | SubmissionServiceError::Validation(_)
        | SubmissionServiceError::NotFound => BackendError::Rejected(error.to_string()),
        SubmissionServiceError::Challenges(_) | SubmissionServiceError::Contracts(_) => {
            BackendError::Transport(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use testresult::TestResult;
    use viscend::{
        language::Language,
        notices::NoticeKind,
        verification::CODE_TTL,
        wizard::{Step, Wizard, WizardSession},
    };

    use crate::{
        delivery::DisabledMailer,
        domain::{
            challenges::MemoryChallengesService,
            contracts::MemoryContractsService,
            memory::MemoryStore,
            submissions::{
                DefaultSubmissionService, MockSubmissionService,
                data::{SubmissionSettings, VerificationIssued},
            },
        },
        test::helpers,
    };

    use super::*;

    fn now() -> TestResult<Timestamp> {
        Ok("2026-10-16T08:00:00Z".parse()?)
    }

    fn submissions() -> Arc<dyn SubmissionService> {
        let store = MemoryStore::new();

        Arc::new(DefaultSubmissionService::new(
            Arc::new(MemoryChallengesService::new(store.clone())),
            Arc::new(MemoryContractsService::new(store)),
            Arc::new(DisabledMailer),
            SubmissionSettings::default(),
        ))
    }

    fn fixed(at: Timestamp) -> Clock {
        Arc::new(move || at)
    }

    async fn verifying_session(
        backend: LocalContractBackend,
    ) -> TestResult<WizardSession<LocalContractBackend>> {
        let mut session =
            WizardSession::new(Wizard::with_draft(helpers::draft("a@b.com"), Language::En), backend);

        session.wizard_mut().submit()?;
        session.confirm().await?;

        Ok(session)
    }

    #[tokio::test]
    async fn wizard_completes_against_the_in_process_service() -> TestResult {
        let mut session =
            verifying_session(LocalContractBackend::with_clock(submissions(), fixed(now()?))).await?;

        let code = session
            .wizard()
            .dev_code()
            .ok_or("expected a disclosed code")?
            .to_string();

        session.wizard_mut().set_code(code)?;
        session.verify_and_submit().await?;

        let Step::Success {
            contract_id,
            document_url,
        } = session.wizard().step()
        else {
            return Err("expected the success step".into());
        };

        assert!(
            document_url.ends_with(&format!("/contracts/{contract_id}/document")),
            "unexpected document url {document_url}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn late_code_reports_expiry_through_the_wizard() -> TestResult {
        let service = submissions();

        let issuing = LocalContractBackend::with_clock(service.clone(), fixed(now()?));
        let session = verifying_session(issuing).await?;
        let code = session
            .wizard()
            .dev_code()
            .ok_or("expected a disclosed code")?
            .to_string();

        let late = now()? + CODE_TTL + SignedDuration::from_secs(1);
        let mut session = WizardSession::new(
            session.wizard().clone(),
            LocalContractBackend::with_clock(service, fixed(late)),
        );

        session.wizard_mut().set_code(code)?;

        let notices = session.verify_and_submit().await?;

        assert_eq!(session.wizard().step(), &Step::Verification);
        assert_eq!(notices.first().map(|n| &n.kind), Some(&NoticeKind::ExpiredCode));

        Ok(())
    }

    #[tokio::test]
    async fn invalid_email_is_a_rejection() -> TestResult {
        let backend = LocalContractBackend::with_clock(submissions(), fixed(now()?));

        let result = backend
            .send_verification(SendVerificationRequest {
                email: "nope".to_string(),
                language: Language::En,
            })
            .await;

        assert!(
            matches!(result, Err(BackendError::Rejected(_))),
            "expected Rejected, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn clock_value_is_passed_to_the_service() -> TestResult {
        let at = now()?;
        let mut submissions = MockSubmissionService::new();

        submissions
            .expect_send_verification()
            .once()
            .withf(move |email, language, now| {
                email == "a@b.com" && *language == Language::Ar && *now == at
            })
            .return_once(|_, _, _| {
                Ok(VerificationIssued {
                    email_sent: true,
                    delivery_failed: false,
                    dev_code: None,
                })
            });

        let response = LocalContractBackend::with_clock(Arc::new(submissions), fixed(at))
            .send_verification(SendVerificationRequest {
                email: "a@b.com".to_string(),
                language: Language::Ar,
            })
            .await?;

        assert!(response.email_sent, "mock reported delivery");

        Ok(())
    }

    fn disclosed_code(session: &WizardSession<LocalContractBackend>) -> TestResult<String> {
        Ok(session
            .wizard()
            .dev_code()
            .ok_or("expected a disclosed code")?
            .to_string())
    }

    #[tokio::test]
    async fn resend_through_the_service_invalidates_the_previous_code() -> TestResult {
        let mut session =
            verifying_session(LocalContractBackend::with_clock(submissions(), fixed(now()?))).await?;

        let first = disclosed_code(&session)?;

        session.resend().await?;

        let second = disclosed_code(&session)?;

        if first != second {
            session.wizard_mut().set_code(first)?;

            let notices = session.verify_and_submit().await?;

            assert_eq!(session.wizard().step(), &Step::Verification);
            assert_eq!(notices.first().map(|n| &n.kind), Some(&NoticeKind::InvalidCode));
        }

        session.wizard_mut().set_code(second)?;
        session.verify_and_submit().await?;

        assert!(
            matches!(session.wizard().step(), Step::Success { .. }),
            "latest code should be accepted"
        );

        Ok(())
    }

    #[tokio::test]
    async fn service_codes_are_single_use() -> TestResult {
        let service = submissions();
        let at = now()?;

        let code = service
            .send_verification("a@b.com".to_string(), Language::En, at)
            .await?
            .dev_code
            .ok_or("expected a disclosed code")?;

        service
            .submit(helpers::draft("a@b.com"), code.clone(), Language::En, at)
            .await?;

        let replay = service
            .submit(helpers::draft("a@b.com"), code, Language::En, at)
            .await;

        assert!(
            matches!(replay, Err(SubmissionServiceError::InvalidCode)),
            "expected InvalidCode, got {replay:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn stored_document_carries_the_confirmed_preview_body() -> TestResult {
        let service = submissions();
        let mut session =
            verifying_session(LocalContractBackend::with_clock(service.clone(), fixed(now()?)))
                .await?;

        let confirmed = session.wizard().preview(jiff::civil::date(2026, 10, 16));
        let code = disclosed_code(&session)?;

        session.wizard_mut().set_code(code)?;
        session.verify_and_submit().await?;

        let Step::Success { contract_id, .. } = session.wizard().step() else {
            return Err("expected the success step".into());
        };

        let record = service.get_contract(contract_id.parse()?).await?;

        assert!(
            record
                .document_html
                .contains(&format!("<body>\n{}", confirmed.body())),
            "stored document body differs from the confirmed preview"
        );

        Ok(())
    }
}
