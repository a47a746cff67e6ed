//! Get Contract Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use viscend_app::domain::contracts::records::{ContractId, ContractRecord};

use crate::{
    contracts::{
        errors::into_status_error,
        requests::{ContractFields, SiteLanguage},
    },
    extensions::*,
    state::State,
};

/// Contract Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContractResponse {
    /// Contract identifier
    pub contract_id: Uuid,

    /// Email address the contract was verified with
    pub client_email: String,

    /// Language the contract was confirmed in
    pub language: SiteLanguage,

    /// Contract fields as confirmed
    pub fields: ContractFields,

    /// Printable contract document
    pub document_path: String,

    /// The date and time the contract was stored
    pub created_at: String,
}

impl From<ContractRecord> for ContractResponse {
    fn from(record: ContractRecord) -> Self {
        ContractResponse {
            contract_id: record.contract_id.into_uuid(),
            client_email: record.client_email,
            language: record.language.into(),
            fields: record.draft.into(),
            document_path: format!("/contracts/{}/document", record.contract_id),
            created_at: record.created_at.to_string(),
        }
    }
}

/// Get Contract Handler
///
/// Returns a stored contract.
#[endpoint(
    tags("contracts"),
    summary = "Get Contract",
    responses(
        (status_code = StatusCode::OK, description = "Contract", body = ContractResponse),
        (status_code = StatusCode::NOT_FOUND, description = "Contract not found"),
    ),
)]
pub(crate) async fn handler(
    contract: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ContractResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let record = state
        .submissions()
        .get_contract(ContractId::from_uuid(contract.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(record.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use viscend_app::domain::submissions::{MockSubmissionService, SubmissionServiceError};

    use crate::{contracts::handlers::tests::make_record, test_helpers::contracts_service};

    use super::*;

    fn make_service(submissions: MockSubmissionService) -> Service {
        contracts_service(submissions, Router::with_path("contracts/{contract}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_200() -> TestResult {
        let contract_id = ContractId::new();
        let record = make_record(contract_id);

        let mut submissions = MockSubmissionService::new();

        submissions
            .expect_get_contract()
            .once()
            .withf(move |id| *id == contract_id)
            .return_once(move |_| Ok(record));

        submissions.expect_send_verification().never();
        submissions.expect_submit().never();

        let mut res = TestClient::get(format!("http://example.com/contracts/{contract_id}"))
            .send(&make_service(submissions))
            .await;

        let body: ContractResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.contract_id, contract_id.into_uuid());
        assert_eq!(body.language, SiteLanguage::Ar);
        assert_eq!(body.fields.service_type.as_deref(), Some("marketing"));
        assert_eq!(
            body.document_path,
            format!("/contracts/{contract_id}/document")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_contract_returns_404() -> TestResult {
        let contract_id = ContractId::new();

        let mut submissions = MockSubmissionService::new();

        submissions
            .expect_get_contract()
            .once()
            .withf(move |id| *id == contract_id)
            .return_once(|_| Err(SubmissionServiceError::NotFound));

        submissions.expect_send_verification().never();
        submissions.expect_submit().never();

        let res = TestClient::get(format!("http://example.com/contracts/{contract_id}"))
            .send(&make_service(submissions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_malformed_id_returns_400() -> TestResult {
        let mut submissions = MockSubmissionService::new();

        submissions.expect_get_contract().never();
        submissions.expect_send_verification().never();
        submissions.expect_submit().never();

        let res = TestClient::get("http://example.com/contracts/not-a-uuid")
            .send(&make_service(submissions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
