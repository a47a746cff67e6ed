//! Contracts service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{info, warn};
use viscend::{draft::normalize_email, verification::VerificationCode};

use crate::{
    database::Db,
    domain::{
        challenges::repository::PgChallengesRepository,
        contracts::{
            data::NewContract,
            errors::ContractsServiceError,
            records::{ContractId, ContractRecord},
            repository::PgContractsRepository,
        },
        memory::MemoryStore,
    },
};

#[derive(Debug, Clone)]
pub struct PgContractsService {
    db: Db,
    challenges: PgChallengesRepository,
    repository: PgContractsRepository,
}

impl PgContractsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            challenges: PgChallengesRepository::new(),
            repository: PgContractsRepository::new(),
        }
    }
}

#[async_trait]
impl ContractsService for PgContractsService {
    async fn create_verified(
        &self,
        email: String,
        code: VerificationCode,
        contract: NewContract,
        now: Timestamp,
    ) -> Result<ContractRecord, ContractsServiceError> {
        let email = normalize_email(&email);

        let mut tx = self.db.begin_transaction().await?;

        let Some(challenge) = self.challenges.lock_challenge(&mut tx, &email).await? else {
            warn!(%email, "no challenge for email");
            return Err(ContractsServiceError::InvalidCode);
        };

        if let Err(error) = challenge.check(&code, now) {
            warn!(%email, %error, "verification rejected");
            return Err(error.into());
        }

        self.challenges.consume_challenge(&mut tx, &email).await?;

        let created = self
            .repository
            .create_contract(&mut tx, &email, &contract, now)
            .await?;

        tx.commit().await?;

        info!(contract_id = %created.contract_id, %email, "contract created");

        Ok(created)
    }

    async fn get_contract(
        &self,
        contract: ContractId,
    ) -> Result<ContractRecord, ContractsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let record = self.repository.get_contract(&mut tx, contract).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn list_contracts(&self) -> Result<Vec<ContractRecord>, ContractsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let records = self.repository.list_contracts(&mut tx).await?;

        tx.commit().await?;

        Ok(records)
    }
}

/// Contracts held in a [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryContractsService {
    store: MemoryStore,
}

impl MemoryContractsService {
    #[must_use]
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ContractsService for MemoryContractsService {
    async fn create_verified(
        &self,
        email: String,
        code: VerificationCode,
        contract: NewContract,
        now: Timestamp,
    ) -> Result<ContractRecord, ContractsServiceError> {
        let email = normalize_email(&email);

        let mut state = self.store.lock().await;

        if state.contracts.contains_key(&contract.contract_id) {
            return Err(ContractsServiceError::AlreadyExists);
        }

        let Some(challenge) = state.challenges.get_mut(&email) else {
            warn!(%email, "no challenge for email");
            return Err(ContractsServiceError::InvalidCode);
        };

        if let Err(error) = challenge.consume(&code, now) {
            warn!(%email, %error, "verification rejected");
            return Err(error.into());
        }

        let record = ContractRecord {
            contract_id: contract.contract_id,
            client_email: email,
            draft: contract.draft,
            language: contract.language,
            document_html: contract.document_html,
            created_at: now,
        };

        state.contracts.insert(record.contract_id, record.clone());

        info!(contract_id = %record.contract_id, email = %record.client_email, "contract created");

        Ok(record)
    }

    async fn get_contract(
        &self,
        contract: ContractId,
    ) -> Result<ContractRecord, ContractsServiceError> {
        self.store
            .lock()
            .await
            .contracts
            .get(&contract)
            .cloned()
            .ok_or(ContractsServiceError::NotFound)
    }

    async fn list_contracts(&self) -> Result<Vec<ContractRecord>, ContractsServiceError> {
        Ok(self
            .store
            .lock()
            .await
            .contracts
            .values()
            .rev()
            .cloned()
            .collect())
    }
}

#[automock]
#[async_trait]
pub trait ContractsService: Send + Sync {
    /// Consume the challenge for `email` with `code` and store the contract.
    ///
    /// Both happen or neither does; a rejected code leaves the challenge and
    /// the contract store untouched.
    async fn create_verified(
        &self,
        email: String,
        code: VerificationCode,
        contract: NewContract,
        now: Timestamp,
    ) -> Result<ContractRecord, ContractsServiceError>;

    /// Retrieve a single contract.
    async fn get_contract(
        &self,
        contract: ContractId,
    ) -> Result<ContractRecord, ContractsServiceError>;

    /// Retrieve all contracts, newest first.
    async fn list_contracts(&self) -> Result<Vec<ContractRecord>, ContractsServiceError>;
}
