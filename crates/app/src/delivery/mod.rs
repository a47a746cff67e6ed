//! Delivery
//!
//! Out-of-band delivery of verification codes.

mod resend;
mod templates;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use viscend::{language::Language, verification::VerificationCode};

pub use resend::{DEFAULT_RESEND_API_BASE, ResendConfig, ResendMailer};
pub use templates::VerificationEmail;

/// Mail delivery errors.
#[derive(Debug, Error)]
pub enum MailerError {
    /// No mail provider is configured
    #[error("mail delivery is not configured")]
    NotConfigured,

    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned a non-2xx response.
    #[error("unexpected response from mail provider: {0}")]
    UnexpectedResponse(String),
}

/// Sends verification codes to clients.
#[automock]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send `code` to `to`, worded in `language`.
    async fn send_verification(
        &self,
        to: String,
        code: VerificationCode,
        language: Language,
    ) -> Result<(), MailerError>;
}

/// Mailer used when no provider is configured; every send fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send_verification(
        &self,
        _to: String,
        _code: VerificationCode,
        _language: Language,
    ) -> Result<(), MailerError> {
        Err(MailerError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_mailer_reports_not_configured() {
        let result = DisabledMailer
            .send_verification(
                "a@b.com".to_string(),
                VerificationCode::from_number(7),
                Language::En,
            )
            .await;

        assert!(
            matches!(result, Err(MailerError::NotConfigured)),
            "expected NotConfigured, got {result:?}"
        );
    }
}
