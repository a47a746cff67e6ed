//! Request-path settings fixed once observability is initialised.

use std::sync::OnceLock;

use crate::config::ServerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RequestSettings {
    slow_request_threshold_ms: u64,
    propagate_parent: bool,
}

const DEFAULTS: RequestSettings = RequestSettings {
    slow_request_threshold_ms: 1_000,
    propagate_parent: false,
};

static SETTINGS: OnceLock<RequestSettings> = OnceLock::new();

impl RequestSettings {
    fn from_config(config: &ServerConfig) -> Self {
        let observability = &config.observability;

        Self {
            slow_request_threshold_ms: observability.slow_request_threshold_ms,
            // Parent contexts are meaningless without an exporter.
            propagate_parent: observability.otel_enabled
                && observability.otel_parent_propagation_enabled,
        }
    }
}

fn current() -> RequestSettings {
    SETTINGS.get().copied().unwrap_or(DEFAULTS)
}

pub(super) fn apply_runtime_config(config: &ServerConfig) {
    if SETTINGS.set(RequestSettings::from_config(config)).is_err() {
        tracing::warn!("observability settings were already applied; keeping the first values");
    }
}

pub(super) fn slow_request_threshold_ms() -> u64 {
    current().slow_request_threshold_ms
}

pub(super) fn otel_parent_propagation_enabled() -> bool {
    current().propagate_parent
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn propagation_needs_an_exporter() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "viscend-json",
            "--otel-parent-propagation-enabled",
            "--slow-request-threshold-ms",
            "250",
        ])?;

        assert_eq!(
            RequestSettings::from_config(&config),
            RequestSettings {
                slow_request_threshold_ms: 250,
                propagate_parent: false,
            }
        );

        Ok(())
    }
}
