//! In-memory storage
//!
//! A single lock guards challenges and contracts together, so consuming a code
//! and storing its contract happen as one step.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use tokio::sync::{Mutex, MutexGuard};
use viscend::verification::VerificationChallenge;

use crate::domain::contracts::records::{ContractId, ContractRecord};

/// Process-local store shared by the in-memory services.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
pub(crate) struct MemoryState {
    /// Latest challenge per normalized email
    pub(crate) challenges: HashMap<String, VerificationChallenge>,

    /// Contracts keyed by their time-ordered id
    pub(crate) contracts: BTreeMap<ContractId, ContractRecord>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().await
    }
}
