//! Resend HTTP API mailer.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use viscend::{language::Language, verification::VerificationCode};

use super::{Mailer, MailerError, VerificationEmail};

/// Default Resend API base URL.
pub const DEFAULT_RESEND_API_BASE: &str = "https://api.resend.com";

/// Configuration for sending through Resend.
#[derive(Clone)]
pub struct ResendConfig {
    /// API base URL, e.g. `"https://api.resend.com"`.
    pub api_base: String,

    /// Resend API key.
    pub api_key: String,

    /// Sender address.
    pub from_address: String,

    /// Optional sender display name.
    pub from_name: Option<String>,
}

impl std::fmt::Debug for ResendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendConfig")
            .field("api_base", &self.api_base)
            .field("api_key", &"<redacted>")
            .field("from_address", &self.from_address)
            .field("from_name", &self.from_name)
            .finish()
    }
}

impl ResendConfig {
    fn sender(&self) -> String {
        match &self.from_name {
            Some(name) => format!("{name} <{}>", self.from_address),
            None => self.from_address.clone(),
        }
    }
}

/// Mailer backed by the Resend HTTP API.
#[derive(Debug, Clone)]
pub struct ResendMailer {
    config: ResendConfig,
    http: Client,
}

impl ResendMailer {
    /// Create a new mailer from the given configuration.
    #[must_use]
    pub fn new(config: ResendConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: String,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send_verification(
        &self,
        to: String,
        code: VerificationCode,
        language: Language,
    ) -> Result<(), MailerError> {
        let content = VerificationEmail::new(&code, language);
        let url = format!("{}/emails", self.config.api_base.trim_end_matches('/'));

        let body = SendEmailRequest {
            from: self.config.sender(),
            to: [&to],
            subject: &content.subject,
            text: &content.text,
            html: &content.html,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(MailerError::UnexpectedResponse(format!(
                "send request failed with status {status}: {text}"
            )));
        }

        let parsed: SendEmailResponse = response.json().await?;

        debug!(email_id = %parsed.id, "verification email accepted");

        Ok(())
    }
}
