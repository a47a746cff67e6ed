//! End-to-end wizard flows against an in-memory contract backend.
//!
//! The backend keeps one challenge per email (last write wins) and applies the
//! verification rules from `viscend::verification`, with a clock the tests move
//! forward by hand.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
};

use jiff::{SignedDuration, Timestamp};
use testresult::TestResult;

use viscend::{
    draft::normalize_email,
    notices::NoticeKind,
    prelude::*,
    verification::{CODE_LENGTH, CODE_TTL},
};

#[derive(Debug)]
struct InMemoryBackend {
    now: Cell<Timestamp>,
    next_code: Cell<u32>,
    challenges: RefCell<HashMap<String, VerificationChallenge>>,
    contracts: RefCell<Vec<SubmitContractRequest>>,
}

impl InMemoryBackend {
    fn new() -> TestResult<Self> {
        Ok(Self {
            now: Cell::new("2026-10-16T08:00:00Z".parse()?),
            next_code: Cell::new(314_159),
            challenges: RefCell::new(HashMap::new()),
            contracts: RefCell::new(Vec::new()),
        })
    }

    fn advance(&self, by: SignedDuration) {
        self.now.set(self.now.get() + by);
    }

    fn stored_contracts(&self) -> usize {
        self.contracts.borrow().len()
    }
}

impl ContractBackend for InMemoryBackend {
    async fn send_verification(
        &self,
        request: SendVerificationRequest,
    ) -> Result<SendVerificationResponse, BackendError> {
        let number = self.next_code.get();
        self.next_code.set(number + 1);

        let code = VerificationCode::from_number(number);
        let email = normalize_email(&request.email);
        let challenge = VerificationChallenge::issue(email.clone(), code.clone(), self.now.get());

        self.challenges.borrow_mut().insert(email, challenge);

        Ok(SendVerificationResponse {
            success: true,
            email_sent: false,
            dev_code: Some(code.to_string()),
        })
    }

    async fn submit_contract(
        &self,
        request: SubmitContractRequest,
    ) -> Result<SubmitContractResponse, BackendError> {
        let candidate = VerificationCode::parse(&request.verification_code)
            .map_err(|_ignored| BackendError::InvalidCode)?;
        let email = request.draft.normalized_email();

        {
            let mut challenges = self.challenges.borrow_mut();
            let challenge = challenges
                .get_mut(&email)
                .ok_or(BackendError::InvalidCode)?;

            challenge
                .consume(&candidate, self.now.get())
                .map_err(|error| match error {
                    VerificationError::InvalidCode => BackendError::InvalidCode,
                    VerificationError::ExpiredCode => BackendError::ExpiredCode,
                })?;
        }

        let mut contracts = self.contracts.borrow_mut();
        contracts.push(request);

        let contract_id = format!("contract-{}", contracts.len());

        Ok(SubmitContractResponse {
            success: true,
            pdf_url: format!("http://localhost/contracts/{contract_id}/document"),
            contract_id,
        })
    }
}

fn draft() -> ContractDraft {
    ContractDraft {
        client_name: "Amal".to_string(),
        client_email: "a@b.com".to_string(),
        client_phone: "+966 50 000 0000".to_string(),
        service_type: Some(ServiceType::Marketing),
        project_name: "Autumn campaign".to_string(),
        project_description: "Social campaign across three channels".to_string(),
        project_cost: "4500".to_string(),
        terms_agreed: true,
        ..ContractDraft::default()
    }
}

async fn session_in_verification() -> TestResult<WizardSession<InMemoryBackend>> {
    let mut session = WizardSession::new(
        Wizard::with_draft(draft(), Language::En),
        InMemoryBackend::new()?,
    );

    session.wizard_mut().submit()?;
    session.confirm().await?;

    Ok(session)
}

fn dev_code(session: &WizardSession<InMemoryBackend>) -> TestResult<String> {
    Ok(session
        .wizard()
        .dev_code()
        .ok_or("expected a disclosed code")?
        .to_string())
}

#[tokio::test]
async fn valid_draft_reaches_success_with_the_disclosed_code() -> TestResult {
    let mut session = session_in_verification().await?;

    let code = dev_code(&session)?;

    assert_eq!(code.len(), CODE_LENGTH);
    assert!(code.bytes().all(|b| b.is_ascii_digit()), "code should be numeric");

    session.wizard_mut().set_code(code)?;
    session.verify_and_submit().await?;

    let Step::Success {
        contract_id,
        document_url,
    } = session.wizard().step()
    else {
        return Err("expected the success step".into());
    };

    assert!(!contract_id.is_empty(), "contract id should be set");
    assert!(!document_url.is_empty(), "document url should be set");
    assert_eq!(session.backend().stored_contracts(), 1);

    Ok(())
}

#[tokio::test]
async fn wrong_code_stays_in_verification_with_the_draft_intact() -> TestResult {
    let mut session = session_in_verification().await?;

    session.wizard_mut().set_code("999999")?;

    let notices = session.verify_and_submit().await?;

    assert_eq!(session.wizard().step(), &Step::Verification);
    assert_eq!(session.wizard().draft(), &draft());
    assert_eq!(notices.first().map(|n| &n.kind), Some(&NoticeKind::InvalidCode));
    assert_eq!(session.backend().stored_contracts(), 0);

    Ok(())
}

#[tokio::test]
async fn resend_invalidates_the_previous_code() -> TestResult {
    let mut session = session_in_verification().await?;

    let first = dev_code(&session)?;

    session.resend().await?;

    let second = dev_code(&session)?;

    assert_ne!(first, second);

    session.wizard_mut().set_code(first)?;

    let notices = session.verify_and_submit().await?;

    assert_eq!(notices.first().map(|n| &n.kind), Some(&NoticeKind::InvalidCode));

    session.wizard_mut().set_code(second)?;
    session.verify_and_submit().await?;

    assert!(
        matches!(session.wizard().step(), Step::Success { .. }),
        "latest code should be accepted"
    );

    Ok(())
}

#[tokio::test]
async fn codes_are_single_use() -> TestResult {
    let backend = InMemoryBackend::new()?;

    backend
        .send_verification(SendVerificationRequest {
            email: "a@b.com".to_string(),
            language: Language::En,
        })
        .await?;

    let request = SubmitContractRequest {
        draft: draft(),
        verification_code: "314159".to_string(),
        language: Language::En,
    };

    backend.submit_contract(request.clone()).await?;

    assert_eq!(
        backend.submit_contract(request).await,
        Err(BackendError::InvalidCode)
    );
    assert_eq!(backend.stored_contracts(), 1);

    Ok(())
}

#[tokio::test]
async fn codes_expire_after_ten_minutes() -> TestResult {
    let mut session = session_in_verification().await?;

    let code = dev_code(&session)?;

    session.backend().advance(CODE_TTL + SignedDuration::from_secs(1));
    session.wizard_mut().set_code(code)?;

    let notices = session.verify_and_submit().await?;

    assert_eq!(session.wizard().step(), &Step::Verification);
    assert_eq!(notices.first().map(|n| &n.kind), Some(&NoticeKind::ExpiredCode));

    Ok(())
}

#[tokio::test]
async fn reset_after_success_restores_defaults() -> TestResult {
    let mut session = session_in_verification().await?;

    let code = dev_code(&session)?;

    session.wizard_mut().set_code(code)?;
    session.verify_and_submit().await?;
    session.wizard_mut().reset()?;

    let wizard = session.wizard();

    assert_eq!(wizard.step(), &Step::Form);
    assert_eq!(wizard.draft().revisions, "3");
    assert!(wizard.draft().client_name.is_empty(), "name should be cleared");
    assert!(!wizard.draft().terms_agreed, "terms should be cleared");

    Ok(())
}

#[tokio::test]
async fn preview_body_matches_the_final_document_body() -> TestResult {
    let mut session = session_in_verification().await?;

    let today = jiff::civil::date(2026, 10, 16);
    let preview = session.wizard().preview(today);

    let code = dev_code(&session)?;

    session.wizard_mut().set_code(code)?;
    session.verify_and_submit().await?;

    let Step::Success { contract_id, .. } = session.wizard().step() else {
        return Err("expected the success step".into());
    };

    let stored = render(
        &draft(),
        Language::En,
        &Footer::Issued {
            contract_id: contract_id.clone(),
            issued_on: today,
        },
    );

    assert_eq!(preview.body(), stored.body());

    Ok(())
}
