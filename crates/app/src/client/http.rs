//! JSON API client.

use reqwest::{Client, Response, StatusCode};
use tracing::debug;
use viscend::{
    api::{
        EXPIRED_CODE_MESSAGE, ErrorResponse, INVALID_CODE_MESSAGE, SendVerificationRequest,
        SendVerificationResponse, SubmitContractRequest, SubmitContractResponse,
    },
    backend::{BackendError, ContractBackend},
};

const SEND_VERIFICATION_PATH: &str = "/contract/send-verification";
const SUBMIT_CONTRACT_PATH: &str = "/contract/submit";

/// Contract backend speaking to the JSON API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpContractBackend {
    base_url: String,
    http: Client,
}

impl HttpContractBackend {
    /// Create a client for the API at `base_url`, e.g. `"http://localhost:8698"`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl ContractBackend for HttpContractBackend {
    async fn send_verification(
        &self,
        request: SendVerificationRequest,
    ) -> Result<SendVerificationResponse, BackendError> {
        let response = self
            .http
            .post(self.url(SEND_VERIFICATION_PATH))
            .json(&request)
            .send()
            .await
            .map_err(transport)?;

        let response = ensure_success(response).await?;

        response.json().await.map_err(transport)
    }

    async fn submit_contract(
        &self,
        request: SubmitContractRequest,
    ) -> Result<SubmitContractResponse, BackendError> {
        let response = self
            .http
            .post(self.url(SUBMIT_CONTRACT_PATH))
            .json(&request)
            .send()
            .await
            .map_err(transport)?;

        let response = ensure_success(response).await?;

        response.json().await.map_err(transport)
    }
}

fn transport(error: reqwest::Error) -> BackendError {
    BackendError::Transport(error.to_string())
}

async fn ensure_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|body| body.error)
        .unwrap_or(text);

    debug!(%status, %message, "contract api rejected request");

    Err(classify(status, message))
}

fn classify(status: StatusCode, message: String) -> BackendError {
    if message == INVALID_CODE_MESSAGE {
        return BackendError::InvalidCode;
    }

    if message == EXPIRED_CODE_MESSAGE || status == StatusCode::GONE {
        return BackendError::ExpiredCode;
    }

    if status.is_client_error() {
        BackendError::Rejected(message)
    } else {
        BackendError::Transport(format!("status {status}: {message}"))
    }
}
