//! Submission service.
//!
//! Issues verification codes and turns verified drafts into stored contracts.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::{Timestamp, tz::TimeZone};
use mockall::automock;
use tracing::{debug, info, warn};
use viscend::{
    document::{Footer, render},
    draft::ContractDraft,
    language::Language,
    validation::{is_valid_email, validate},
    verification::VerificationCode,
};

use crate::{
    delivery::{Mailer, MailerError},
    domain::{
        challenges::ChallengesService,
        contracts::{
            ContractsService,
            data::NewContract,
            records::{ContractId, ContractRecord},
        },
        submissions::{
            data::{ContractCreated, SubmissionSettings, VerificationIssued},
            errors::SubmissionServiceError,
        },
    },
};

#[derive(Clone)]
pub struct DefaultSubmissionService {
    challenges: Arc<dyn ChallengesService>,
    contracts: Arc<dyn ContractsService>,
    mailer: Arc<dyn Mailer>,
    settings: SubmissionSettings,
}

impl std::fmt::Debug for DefaultSubmissionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultSubmissionService")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl DefaultSubmissionService {
    #[must_use]
    pub fn new(
        challenges: Arc<dyn ChallengesService>,
        contracts: Arc<dyn ContractsService>,
        mailer: Arc<dyn Mailer>,
        settings: SubmissionSettings,
    ) -> Self {
        Self {
            challenges,
            contracts,
            mailer,
            settings,
        }
    }
}

#[async_trait]
impl SubmissionService for DefaultSubmissionService {
    async fn send_verification(
        &self,
        email: String,
        language: Language,
        now: Timestamp,
    ) -> Result<VerificationIssued, SubmissionServiceError> {
        if !is_valid_email(email.trim()) {
            return Err(SubmissionServiceError::InvalidEmail);
        }

        let challenge = self.challenges.issue(email, now).await?;

        let (email_sent, delivery_failed) = match self
            .mailer
            .send_verification(challenge.email.clone(), challenge.code.clone(), language)
            .await
        {
            Ok(()) => (true, false),
            Err(MailerError::NotConfigured) => {
                debug!(email = %challenge.email, "mail delivery disabled");
                (false, false)
            }
            Err(error) => {
                warn!(email = %challenge.email, %error, "verification email not delivered");
                (false, true)
            }
        };

        let dev_code = self
            .settings
            .dev_code_policy
            .discloses(email_sent)
            .then(|| challenge.code.to_string());

        info!(
            email = %challenge.email,
            email_sent,
            disclosed = dev_code.is_some(),
            "verification code issued"
        );

        Ok(VerificationIssued {
            email_sent,
            delivery_failed,
            dev_code,
        })
    }

    async fn submit(
        &self,
        draft: ContractDraft,
        code: String,
        language: Language,
        now: Timestamp,
    ) -> Result<ContractCreated, SubmissionServiceError> {
        validate(&draft)?;

        let Ok(code) = VerificationCode::parse(&code) else {
            return Err(SubmissionServiceError::InvalidCode);
        };

        let contract_id = ContractId::new();

        let document = render(
            &draft,
            language,
            &Footer::Issued {
                contract_id: contract_id.to_string(),
                issued_on: now.to_zoned(TimeZone::UTC).date(),
            },
        );

        let email = draft.client_email.clone();

        let record = self
            .contracts
            .create_verified(
                email,
                code,
                NewContract {
                    contract_id,
                    draft,
                    language,
                    document_html: document.to_html(),
                },
                now,
            )
            .await?;

        Ok(ContractCreated {
            contract_id: record.contract_id,
            document_url: self.settings.document_url(record.contract_id),
        })
    }

    async fn get_contract(
        &self,
        contract: ContractId,
    ) -> Result<ContractRecord, SubmissionServiceError> {
        Ok(self.contracts.get_contract(contract).await?)
    }
}

#[automock]
#[async_trait]
pub trait SubmissionService: Send + Sync {
    /// Issue a verification code for `email` and try to deliver it.
    ///
    /// Delivery failures are logged and reflected in
    /// [`VerificationIssued::email_sent`], never returned as errors.
    async fn send_verification(
        &self,
        email: String,
        language: Language,
        now: Timestamp,
    ) -> Result<VerificationIssued, SubmissionServiceError>;

    /// Verify `code` for the draft's email and store the contract.
    async fn submit(
        &self,
        draft: ContractDraft,
        code: String,
        language: Language,
        now: Timestamp,
    ) -> Result<ContractCreated, SubmissionServiceError>;

    /// Retrieve a stored contract.
    async fn get_contract(
        &self,
        contract: ContractId,
    ) -> Result<ContractRecord, SubmissionServiceError>;
}
