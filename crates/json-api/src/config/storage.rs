//! Storage Config

use clap::{Args, ValueEnum};
use thiserror::Error;
use viscend_app::context::StorageSettings;

/// Storage backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    /// Process memory, lost on restart.
    Memory,

    /// `PostgreSQL`.
    Postgres,
}

/// Storage settings could not be resolved.
#[derive(Debug, Error)]
pub enum StorageConfigError {
    /// Postgres selected without a connection string
    #[error("DATABASE_URL is required when STORAGE_BACKEND is postgres")]
    MissingDatabaseUrl,
}

/// Storage settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Storage backend (memory, postgres)
    #[arg(long, env = "STORAGE_BACKEND", value_enum, default_value_t = StorageBackend::Memory)]
    pub storage_backend: StorageBackend,

    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

impl StorageConfig {
    /// Resolve the selected backend into application storage settings.
    ///
    /// # Errors
    ///
    /// Returns an error when `postgres` is selected without a database URL.
    pub fn settings(&self) -> Result<StorageSettings, StorageConfigError> {
        match self.storage_backend {
            StorageBackend::Memory => Ok(StorageSettings::Memory),
            StorageBackend::Postgres => self
                .database_url
                .clone()
                .filter(|url| !url.trim().is_empty())
                .map(|database_url| StorageSettings::Postgres { database_url })
                .ok_or(StorageConfigError::MissingDatabaseUrl),
        }
    }
}
