//! App Router

use salvo::{
    Router,
    cors::{AllowHeaders, AllowMethods, Cors, CorsHandler},
    http::{
        Method,
        header::{ACCEPT, CONTENT_TYPE},
    },
};

use crate::{config::ServerConfig, contracts, healthcheck, observability};

/// Browser access for the configured site origin.
pub(crate) fn cors(allowed_origin: &str) -> CorsHandler {
    Cors::new()
        .allow_origin(allowed_origin)
        .allow_methods(AllowMethods::list([Method::GET, Method::POST, Method::OPTIONS]))
        .allow_headers(AllowHeaders::list([CONTENT_TYPE, ACCEPT]))
        .into_handler()
}

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("contract")
                .push(
                    Router::with_path("send-verification")
                        .post(contracts::send_verification::handler),
                )
                .push(Router::with_path("submit").post(contracts::submit::handler)),
        )
        .push(
            Router::with_path("contracts/{contract}")
                .get(contracts::get::handler)
                .push(Router::with_path("document").get(contracts::document::handler)),
        )
}

pub(crate) fn ops_router(config: &ServerConfig) -> Router {
    let router = Router::new().push(Router::with_path("healthcheck").get(healthcheck::handler));

    if config.observability.metrics_enabled {
        router.push(Router::with_path("metrics").get(observability::metrics_handler))
    } else {
        router
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use serde_json::{Value, json};
    use testresult::TestResult;
    use viscend_app::{
        context::{AppContext, AppSettings, MailSettings, StorageSettings},
        domain::submissions::data::SubmissionSettings,
    };

    use crate::state::State;

    use super::*;

    async fn memory_service() -> TestResult<Service> {
        let app = AppContext::from_settings(AppSettings {
            storage: StorageSettings::Memory,
            mail: MailSettings::Disabled,
            submissions: SubmissionSettings::default(),
        })
        .await?;

        Ok(Service::new(
            Router::new()
                .hoop(inject(State::shared(app)))
                .push(app_router()),
        )
        .hoop(cors("https://viscend.studio")))
    }

    #[tokio::test]
    async fn test_contract_workflow_over_http() -> TestResult {
        let service = memory_service().await?;

        let issued: Value = TestClient::post("http://example.com/contract/send-verification")
            .json(&json!({ "email": "A@B.com", "language": "en" }))
            .send(&service)
            .await
            .take_json()
            .await?;

        let code = issued["devCode"].as_str().ok_or("expected a disclosed code")?;

        let mut res = TestClient::post("http://example.com/contract/submit")
            .json(&json!({
                "clientName": "Amal",
                "clientEmail": "a@b.com",
                "clientPhone": "+966 50 000 0000",
                "serviceType": "studio",
                "projectName": "Launch film",
                "projectDescription": "Two minute brand film",
                "termsAgreed": true,
                "verificationCode": code,
                "language": "en",
            }))
            .send(&service)
            .await;

        let created: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let contract_id = created["contractId"].as_str().ok_or("expected a contract id")?;

        let mut res = TestClient::get(format!(
            "http://example.com/contracts/{contract_id}/document"
        ))
        .send(&service)
        .await;

        let document = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(document.contains(contract_id), "footer should carry the id");

        let replay = TestClient::post("http://example.com/contract/submit")
            .json(&json!({
                "clientName": "Amal",
                "clientEmail": "a@b.com",
                "clientPhone": "+966 50 000 0000",
                "serviceType": "studio",
                "projectName": "Launch film",
                "projectDescription": "Two minute brand film",
                "termsAgreed": true,
                "verificationCode": code,
            }))
            .send(&service)
            .await;

        assert_eq!(replay.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_contract_returns_404() -> TestResult {
        let service = memory_service().await?;

        let res = TestClient::get("http://example.com/contracts/0199ec1e-4f3a-7c2b-9d10-2f6a9b3c4d5e")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_the_site_origin() -> TestResult {
        let service = memory_service().await?;

        let res = TestClient::options("http://example.com/contract/submit")
            .add_header("origin", "https://viscend.studio", true)
            .add_header("access-control-request-method", "POST", true)
            .send(&service)
            .await;

        let allowed = res
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok());

        assert_eq!(allowed, Some("https://viscend.studio"));

        Ok(())
    }
}
