//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::{
    database::{self, Db},
    delivery::{DisabledMailer, Mailer, ResendConfig, ResendMailer},
    domain::{
        challenges::{ChallengesService, MemoryChallengesService, PgChallengesService},
        contracts::{ContractsService, MemoryContractsService, PgContractsService},
        memory::MemoryStore,
        submissions::{DefaultSubmissionService, SubmissionService, data::SubmissionSettings},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migration(#[source] sqlx::migrate::MigrateError),
}

/// Where challenges and contracts are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageSettings {
    /// Process memory; lost on restart
    Memory,

    /// `PostgreSQL` at the given URL
    Postgres { database_url: String },
}

/// How verification codes are delivered.
#[derive(Debug, Clone)]
pub enum MailSettings {
    /// No delivery; codes are only available through disclosure
    Disabled,

    /// Resend HTTP API
    Resend(ResendConfig),
}

/// Settings needed to build an [`AppContext`].
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub storage: StorageSettings,
    pub mail: MailSettings,
    pub submissions: SubmissionSettings,
}

#[derive(Clone)]
pub struct AppContext {
    pub submissions: Arc<dyn SubmissionService>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from settings.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting to or migrating the database fails.
    pub async fn from_settings(settings: AppSettings) -> Result<Self, AppInitError> {
        let (challenges, contracts): (Arc<dyn ChallengesService>, Arc<dyn ContractsService>) =
            match &settings.storage {
                StorageSettings::Memory => {
                    let store = MemoryStore::new();

                    (
                        Arc::new(MemoryChallengesService::new(store.clone())),
                        Arc::new(MemoryContractsService::new(store)),
                    )
                }
                StorageSettings::Postgres { database_url } => {
                    let pool = database::connect(database_url)
                        .await
                        .map_err(AppInitError::Database)?;

                    database::migrate(&pool)
                        .await
                        .map_err(AppInitError::Migration)?;

                    let db = Db::new(pool);

                    (
                        Arc::new(PgChallengesService::new(db.clone())),
                        Arc::new(PgContractsService::new(db)),
                    )
                }
            };

        let mailer: Arc<dyn Mailer> = match settings.mail {
            MailSettings::Disabled => Arc::new(DisabledMailer),
            MailSettings::Resend(config) => Arc::new(ResendMailer::new(config)),
        };

        info!(
            storage = settings.storage.name(),
            dev_code_policy = ?settings.submissions.dev_code_policy,
            "application context ready"
        );

        Ok(Self {
            submissions: Arc::new(DefaultSubmissionService::new(
                challenges,
                contracts,
                mailer,
                settings.submissions,
            )),
        })
    }
}

impl StorageSettings {
    fn name(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres { .. } => "postgres",
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;
    use viscend::language::Language;

    use super::*;

    #[tokio::test]
    async fn memory_context_issues_codes_without_a_mailer() -> TestResult {
        let context = AppContext::from_settings(AppSettings {
            storage: StorageSettings::Memory,
            mail: MailSettings::Disabled,
            submissions: SubmissionSettings::default(),
        })
        .await?;

        let issued = context
            .submissions
            .send_verification("a@b.com".to_string(), Language::En, Timestamp::now())
            .await?;

        assert!(!issued.email_sent, "no mailer configured");
        assert!(issued.dev_code.is_some(), "default policy discloses on failure");

        Ok(())
    }
}
