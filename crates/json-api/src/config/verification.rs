//! Verification Config

use clap::Args;
use viscend_app::domain::submissions::data::{DevCodePolicy, SubmissionSettings};

/// Verification code settings.
#[derive(Debug, Args)]
pub struct VerificationConfig {
    /// When issued codes are returned in the response (never, on-delivery-failure, always)
    #[arg(long, env = "DEV_CODE_POLICY", value_enum, default_value_t = DevCodePolicy::OnDeliveryFailure)]
    pub dev_code_policy: DevCodePolicy,
}

impl VerificationConfig {
    pub(crate) fn submission_settings(&self, public_base_url: &str) -> SubmissionSettings {
        SubmissionSettings {
            public_base_url: public_base_url.to_string(),
            dev_code_policy: self.dev_code_policy,
        }
    }
}
