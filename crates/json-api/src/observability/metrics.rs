//! Prometheus metrics collection and exposition endpoint.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder, core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

/// Contract workflow outcomes worth counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WorkflowEvent {
    /// A verification code was issued
    CodeIssued,

    /// A verification email could not be delivered
    DeliveryFailed,

    /// A submitted code did not match or was already used
    InvalidCode,

    /// A submitted code had expired
    ExpiredCode,

    /// A verified contract was stored
    ContractCreated,
}

#[derive(Debug)]
struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    codes_issued_total: IntCounter,
    email_delivery_failures_total: IntCounter,
    verification_rejections_total: IntCounterVec,
    contracts_created_total: IntCounter,
}

static METRICS: OnceLock<Option<Metrics>> = OnceLock::new();

#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    tracked: bool,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        if let Some(metrics) = metrics() {
            metrics.requests_in_flight.inc();
            return Self { tracked: true };
        }

        Self { tracked: false }
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if self.tracked
            && let Some(metrics) = metrics()
        {
            metrics.requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_class = status_class(status_code);
    let status_code = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[method, route, status_class, status_code.as_str()])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

pub(crate) fn record_workflow_event(event: WorkflowEvent) {
    let Some(metrics) = metrics() else {
        return;
    };

    match event {
        WorkflowEvent::CodeIssued => metrics.codes_issued_total.inc(),
        WorkflowEvent::DeliveryFailed => metrics.email_delivery_failures_total.inc(),
        WorkflowEvent::InvalidCode => metrics
            .verification_rejections_total
            .with_label_values(&["invalid"])
            .inc(),
        WorkflowEvent::ExpiredCode => metrics
            .verification_rejections_total
            .with_label_values(&["expired"])
            .inc(),
        WorkflowEvent::ContractCreated => metrics.contracts_created_total.inc(),
    }
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let encoder = TextEncoder::new();
    let metric_families = metrics.registry.gather();

    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metric_families, &mut encoded) {
        error!("failed to encode metrics response: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    let content_type = match HeaderValue::from_str(encoder.format_type()) {
        Ok(value) => value,
        Err(source) => {
            error!("failed to encode metrics content type header: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

            return;
        }
    };

    res.headers_mut().insert(CONTENT_TYPE, content_type);
    res.render(String::from_utf8_lossy(&encoded).into_owned());
}

fn metrics() -> Option<&'static Metrics> {
    METRICS.get_or_init(build_metrics).as_ref()
}

fn register<M>(registry: &Registry, name: &str, metric: prometheus::Result<M>) -> Option<M>
where
    M: Collector + Clone + 'static,
{
    let metric = match metric {
        Ok(metric) => metric,
        Err(source) => {
            error!("failed to create {name} metric: {source}");
            return None;
        }
    };

    if let Err(source) = registry.register(Box::new(metric.clone())) {
        error!("failed to register {name} metric: {source}");
        return None;
    }

    Some(metric)
}

fn build_metrics() -> Option<Metrics> {
    let registry = Registry::new();

    let requests_total = register(
        &registry,
        "requests_total",
        IntCounterVec::new(
            Opts::new(
                "viscend_json_http_requests_total",
                "Total HTTP requests partitioned by method, route, status class, and status code.",
            ),
            &["method", "route", "status_class", "status_code"],
        ),
    )?;

    let request_duration_seconds = register(
        &registry,
        "request_duration",
        HistogramVec::new(
            HistogramOpts::new(
                "viscend_json_http_request_duration_seconds",
                "HTTP request duration in seconds partitioned by method and route.",
            )
            .buckets(vec![
                0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ]),
            &["method", "route"],
        ),
    )?;

    let requests_in_flight = register(
        &registry,
        "in-flight gauge",
        IntGauge::with_opts(Opts::new(
            "viscend_json_http_requests_in_flight",
            "Current number of in-flight HTTP requests.",
        )),
    )?;

    let codes_issued_total = register(
        &registry,
        "codes_issued",
        IntCounter::with_opts(Opts::new(
            "viscend_json_verification_codes_issued_total",
            "Verification codes issued.",
        )),
    )?;

    let email_delivery_failures_total = register(
        &registry,
        "email_delivery_failures",
        IntCounter::with_opts(Opts::new(
            "viscend_json_email_delivery_failures_total",
            "Verification emails that could not be delivered.",
        )),
    )?;

    let verification_rejections_total = register(
        &registry,
        "verification_rejections",
        IntCounterVec::new(
            Opts::new(
                "viscend_json_verification_rejections_total",
                "Submitted verification codes rejected, partitioned by reason.",
            ),
            &["reason"],
        ),
    )?;

    let contracts_created_total = register(
        &registry,
        "contracts_created",
        IntCounter::with_opts(Opts::new(
            "viscend_json_contracts_created_total",
            "Verified contracts stored.",
        )),
    )?;

    Some(Metrics {
        registry,
        requests_total,
        request_duration_seconds,
        requests_in_flight,
        codes_issued_total,
        email_delivery_failures_total,
        verification_rejections_total,
        contracts_created_total,
    })
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}
