//! Challenges service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::debug;
use viscend::{draft::normalize_email, verification::VerificationChallenge};

use crate::{
    database::Db,
    domain::{
        challenges::{code, errors::ChallengesServiceError, repository::PgChallengesRepository},
        memory::MemoryStore,
    },
};

#[derive(Debug, Clone)]
pub struct PgChallengesService {
    db: Db,
    repository: PgChallengesRepository,
}

impl PgChallengesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgChallengesRepository::new(),
        }
    }
}

#[async_trait]
impl ChallengesService for PgChallengesService {
    async fn issue(
        &self,
        email: String,
        now: Timestamp,
    ) -> Result<VerificationChallenge, ChallengesServiceError> {
        let challenge = VerificationChallenge::issue(normalize_email(&email), code::generate(), now);

        let mut tx = self.db.begin_transaction().await?;

        let stored = self.repository.upsert_challenge(&mut tx, &challenge).await?;

        tx.commit().await?;

        debug!(email = %stored.email, expires_at = %stored.expires_at, "issued challenge");

        Ok(stored)
    }

    async fn purge_expired(&self, now: Timestamp) -> Result<u64, ChallengesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let purged = self.repository.purge_challenges(&mut tx, now).await?;

        tx.commit().await?;

        Ok(purged)
    }
}

/// Challenges held in a [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryChallengesService {
    store: MemoryStore,
}

impl MemoryChallengesService {
    #[must_use]
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ChallengesService for MemoryChallengesService {
    async fn issue(
        &self,
        email: String,
        now: Timestamp,
    ) -> Result<VerificationChallenge, ChallengesServiceError> {
        let challenge = VerificationChallenge::issue(normalize_email(&email), code::generate(), now);

        self.store
            .lock()
            .await
            .challenges
            .insert(challenge.email.clone(), challenge.clone());

        debug!(email = %challenge.email, expires_at = %challenge.expires_at, "issued challenge");

        Ok(challenge)
    }

    async fn purge_expired(&self, now: Timestamp) -> Result<u64, ChallengesServiceError> {
        let mut state = self.store.lock().await;

        let before = state.challenges.len();

        state
            .challenges
            .retain(|_, challenge| !challenge.consumed && !challenge.is_expired(now));

        Ok(u64::try_from(before - state.challenges.len()).unwrap_or(u64::MAX))
    }
}

#[automock]
#[async_trait]
pub trait ChallengesService: Send + Sync {
    /// Issue a fresh code for `email`, replacing any outstanding challenge for it.
    async fn issue(
        &self,
        email: String,
        now: Timestamp,
    ) -> Result<VerificationChallenge, ChallengesServiceError>;

    /// Delete challenges that are consumed or expired at `now`.
    async fn purge_expired(&self, now: Timestamp) -> Result<u64, ChallengesServiceError>;
}
