//! Send Verification Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    contracts::{
        errors::{ErrorResponse, render_rejection},
        requests::SendVerificationRequest,
    },
    extensions::*,
    observability::{WorkflowEvent, record_workflow_event},
    state::State,
};

/// Send Verification Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SendVerificationResponse {
    /// Whether a code was issued
    pub success: bool,

    /// Whether the verification email was delivered
    pub email_sent: bool,

    /// The issued code, when disclosure is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_code: Option<String>,
}

/// Send Verification Handler
///
/// Issues a six digit code for the email address. Any earlier code for the
/// same address stops working.
#[endpoint(
    tags("contracts"),
    summary = "Send Verification Code",
    responses(
        (status_code = StatusCode::OK, description = "Code issued", body = SendVerificationResponse),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid email address", body = ErrorResponse),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SendVerificationRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let issued = match state
        .submissions()
        .send_verification(request.email, request.language.into(), Timestamp::now())
        .await
    {
        Ok(issued) => issued,
        Err(error) => return render_rejection(res, error),
    };

    record_workflow_event(WorkflowEvent::CodeIssued);

    if issued.delivery_failed {
        record_workflow_event(WorkflowEvent::DeliveryFailed);
    }

    res.render(Json(SendVerificationResponse {
        success: true,
        email_sent: issued.email_sent,
        dev_code: issued.dev_code,
    }));

    Ok(())
}
