//! Errors

use salvo::{http::StatusError, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::error;
use viscend::api::{EXPIRED_CODE_MESSAGE, INVALID_CODE_MESSAGE};
use viscend_app::domain::submissions::SubmissionServiceError;

use crate::observability::{WorkflowEvent, record_workflow_event};

/// Error Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    /// Human readable reason
    pub error: String,
}

/// Write a workflow rejection as a JSON error body.
///
/// Failures the client cannot act on are returned as a plain status error instead.
pub(crate) fn render_rejection(
    res: &mut Response,
    error: SubmissionServiceError,
) -> Result<(), StatusError> {
    let (status, message) = match error {
        SubmissionServiceError::InvalidEmail => {
            (StatusCode::BAD_REQUEST, "Invalid email address".to_string())
        }
        SubmissionServiceError::Validation(source) => {
            (StatusCode::UNPROCESSABLE_ENTITY, source.to_string())
        }
        SubmissionServiceError::InvalidCode => {
            record_workflow_event(WorkflowEvent::InvalidCode);

            (StatusCode::BAD_REQUEST, INVALID_CODE_MESSAGE.to_string())
        }
        SubmissionServiceError::ExpiredCode => {
            record_workflow_event(WorkflowEvent::ExpiredCode);

            (StatusCode::GONE, EXPIRED_CODE_MESSAGE.to_string())
        }
        other => return Err(into_status_error(other)),
    };

    render_error(res, status, message);

    Ok(())
}

pub(crate) fn render_error(res: &mut Response, status: StatusCode, message: impl Into<String>) {
    res.status_code(status).render(Json(ErrorResponse {
        error: message.into(),
    }));
}

pub(crate) fn into_status_error(error: SubmissionServiceError) -> StatusError {
    match error {
        SubmissionServiceError::NotFound => StatusError::not_found().brief("Contract not found"),
        SubmissionServiceError::InvalidEmail | SubmissionServiceError::Validation(_) => {
            StatusError::bad_request().brief(error.to_string())
        }
        SubmissionServiceError::InvalidCode => StatusError::bad_request().brief(INVALID_CODE_MESSAGE),
        SubmissionServiceError::ExpiredCode => StatusError::gone().brief(EXPIRED_CODE_MESSAGE),
        SubmissionServiceError::Challenges(source) => {
            error!("failed to issue verification code: {source}");

            StatusError::internal_server_error()
        }
        SubmissionServiceError::Contracts(source) => {
            error!("failed to store contract: {source}");

            StatusError::internal_server_error()
        }
    }
}
