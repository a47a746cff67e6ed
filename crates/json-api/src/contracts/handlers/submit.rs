//! Submit Contract Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use viscend::draft::ContractDraft;

use crate::{
    contracts::{
        errors::{ErrorResponse, render_error, render_rejection},
        requests::SubmitContractRequest,
    },
    extensions::*,
    observability::{WorkflowEvent, record_workflow_event},
    state::State,
};

/// Submit Contract Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitContractResponse {
    /// Whether the contract was stored
    pub success: bool,

    /// Identifier of the stored contract
    pub contract_id: String,

    /// Printable contract document
    pub pdf_url: String,
}

/// Submit Contract Handler
///
/// Verifies the code issued to the client email and stores the contract.
#[endpoint(
    tags("contracts"),
    summary = "Submit Contract",
    responses(
        (status_code = StatusCode::CREATED, description = "Contract stored", body = SubmitContractResponse),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid verification code", body = ErrorResponse),
        (status_code = StatusCode::GONE, description = "Verification code expired", body = ErrorResponse),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Incomplete contract", body = ErrorResponse),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SubmitContractRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let draft = match ContractDraft::try_from(request.fields) {
        Ok(draft) => draft,
        Err(error) => {
            render_error(res, StatusCode::BAD_REQUEST, error.to_string());

            return Ok(());
        }
    };

    let created = match state
        .submissions()
        .submit(
            draft,
            request.verification_code,
            request.language.into(),
            Timestamp::now(),
        )
        .await
    {
        Ok(created) => created,
        Err(error) => return render_rejection(res, error),
    };

    record_workflow_event(WorkflowEvent::ContractCreated);

    info!(
        contract_id = %created.contract_id,
        request_id = depot.request_id(),
        "contract submitted"
    );

    res.add_header(LOCATION, format!("/contracts/{}", created.contract_id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED)
        .render(Json(SubmitContractResponse {
            success: true,
            contract_id: created.contract_id.to_string(),
            pdf_url: created.document_url,
        }));

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;
    use viscend::{language::Language, validation::ValidationError};
    use viscend_app::domain::{
        contracts::records::ContractId,
        submissions::{MockSubmissionService, SubmissionServiceError, data::ContractCreated},
    };

    use crate::{contracts::handlers::tests::make_draft, test_helpers::contracts_service};

    use super::*;

    fn make_service(submissions: MockSubmissionService) -> Service {
        contracts_service(submissions, Router::with_path("contract/submit").post(handler))
    }

    fn payload(code: &str) -> Value {
        json!({
            "clientName": "Amal",
            "clientEmail": "a@b.com",
            "clientPhone": "+966 50 000 0000",
            "serviceType": "marketing",
            "projectName": "Autumn campaign",
            "projectDescription": "Social campaign across three channels",
            "projectCost": "4500",
            "termsAgreed": true,
            "verificationCode": code,
            "language": "en",
        })
    }

    fn rejecting(error: SubmissionServiceError) -> MockSubmissionService {
        let mut submissions = MockSubmissionService::new();

        submissions
            .expect_submit()
            .once()
            .return_once(move |_, _, _, _| Err(error));

        submissions.expect_send_verification().never();
        submissions.expect_get_contract().never();

        submissions
    }

    #[tokio::test]
    async fn test_submit_success_returns_201() -> TestResult {
        let contract_id = ContractId::new();
        let document_url = format!("https://viscend.studio/contracts/{contract_id}/document");
        let returned_url = document_url.clone();

        let mut submissions = MockSubmissionService::new();

        submissions
            .expect_submit()
            .once()
            .withf(|draft, code, language, _| {
                *draft == make_draft() && code == "314159" && *language == Language::En
            })
            .return_once(move |_, _, _, _| {
                Ok(ContractCreated {
                    contract_id,
                    document_url: returned_url,
                })
            });

        submissions.expect_send_verification().never();
        submissions.expect_get_contract().never();

        let mut res = TestClient::post("http://example.com/contract/submit")
            .json(&payload("314159"))
            .send(&make_service(submissions))
            .await;

        let body: SubmitContractResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/contracts/{contract_id}").as_str()));
        assert!(body.success, "submission should succeed");
        assert_eq!(body.contract_id, contract_id.to_string());
        assert_eq!(body.pdf_url, document_url);

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_invalid_code_returns_400_with_message() -> TestResult {
        let mut res = TestClient::post("http://example.com/contract/submit")
            .json(&payload("999999"))
            .send(&make_service(rejecting(SubmissionServiceError::InvalidCode)))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body, json!({ "error": "Invalid verification code" }));

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_expired_code_returns_410_with_message() -> TestResult {
        let mut res = TestClient::post("http://example.com/contract/submit")
            .json(&payload("314159"))
            .send(&make_service(rejecting(SubmissionServiceError::ExpiredCode)))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::GONE));
        assert_eq!(body, json!({ "error": "Verification code expired" }));

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_incomplete_draft_returns_422() -> TestResult {
        let mut res = TestClient::post("http://example.com/contract/submit")
            .json(&payload("314159"))
            .send(&make_service(rejecting(SubmissionServiceError::Validation(
                ValidationError::TermsNotAgreed,
            ))))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert_eq!(body.error, ValidationError::TermsNotAgreed.to_string());

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_unknown_service_type_returns_400_without_calling_service() -> TestResult {
        let mut submissions = MockSubmissionService::new();

        submissions.expect_submit().never();
        submissions.expect_send_verification().never();
        submissions.expect_get_contract().never();

        let mut payload = payload("314159");

        payload["serviceType"] = json!("print");

        let res = TestClient::post("http://example.com/contract/submit")
            .json(&payload)
            .send(&make_service(submissions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
