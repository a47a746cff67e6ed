//! Server configuration module

use clap::Parser;
use viscend_app::context::{AppSettings, MailSettings};

use crate::config::{
    mail::MailConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
    storage::{StorageConfig, StorageConfigError},
    verification::VerificationConfig,
};

pub(crate) mod mail;
pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod storage;
pub(crate) mod verification;

/// `VisCend` JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "viscend-json", about = "VisCend JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Contract and challenge storage settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Verification email delivery settings.
    #[command(flatten)]
    pub mail: MailConfig,

    /// Verification code settings.
    #[command(flatten)]
    pub verification: VerificationConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings for building the application context.
    ///
    /// # Errors
    ///
    /// Returns an error when the selected storage backend is missing its settings.
    pub fn app_settings(&self) -> Result<AppSettings, StorageConfigError> {
        Ok(AppSettings {
            storage: self.storage.settings()?,
            mail: self
                .mail
                .resend_config()
                .map_or(MailSettings::Disabled, MailSettings::Resend),
            submissions: self
                .verification
                .submission_settings(&self.server.public_base_url),
        })
    }
}
