//! Mail Config

use clap::Args;
use viscend_app::delivery::{DEFAULT_RESEND_API_BASE, ResendConfig};

/// Verification email delivery settings.
///
/// Delivery is enabled when an API key is set.
#[derive(Debug, Args)]
pub struct MailConfig {
    /// Resend API key
    #[arg(long, env = "RESEND_API_KEY", hide_env_values = true)]
    pub resend_api_key: Option<String>,

    /// Resend API base URL
    #[arg(long, env = "RESEND_API_BASE", default_value = DEFAULT_RESEND_API_BASE)]
    pub resend_api_base: String,

    /// Sender address for verification emails
    #[arg(long, env = "MAIL_FROM", default_value = "onboarding@resend.dev")]
    pub mail_from: String,

    /// Sender display name for verification emails
    #[arg(long, env = "MAIL_FROM_NAME", default_value = "VisCend")]
    pub mail_from_name: Option<String>,
}

impl MailConfig {
    /// Resend settings, when an API key is configured.
    pub fn resend_config(&self) -> Option<ResendConfig> {
        let api_key = self
            .resend_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())?;

        Some(ResendConfig {
            api_base: self.resend_api_base.clone(),
            api_key: api_key.to_string(),
            from_address: self.mail_from.clone(),
            from_name: self
                .mail_from_name
                .clone()
                .filter(|name| !name.trim().is_empty()),
        })
    }
}
