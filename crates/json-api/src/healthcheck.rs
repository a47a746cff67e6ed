//! Liveness probe.

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Process status reported by the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ServiceStatus {
    /// Accepting requests
    Ok,
}

/// Liveness probe body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HealthResponse {
    /// Process status
    pub status: ServiceStatus,

    /// Crate version of the running binary
    pub version: String,
}

/// Healthcheck
///
/// Answers as long as the process can serve requests. Storage and mail are not probed.
#[endpoint(
    tags("ops"),
    summary = "Liveness probe",
    responses(
        (status_code = StatusCode::OK, description = "Service is up", body = HealthResponse),
    ),
)]
pub(crate) async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: ServiceStatus::Ok,
        version: VERSION.to_string(),
    })
}
