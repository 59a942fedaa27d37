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

use bazaar_app::domain::{accounts::records::Role, orders::status::OrderStatus};

#[derive(Debug)]
struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    registrations_total: IntCounterVec,
    orders_placed_total: IntCounter,
    order_status_changes_total: IntCounterVec,
}

static METRICS: OnceLock<Option<Metrics>> = OnceLock::new();

/// Who moved an order into a new status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusChangeActor {
    Owner,
    Admin,
}

impl StatusChangeActor {
    fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
        }
    }
}

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

pub(crate) fn record_registration(role: Role) {
    if let Some(metrics) = metrics() {
        metrics
            .registrations_total
            .with_label_values(&[role.as_str()])
            .inc();
    }
}

pub(crate) fn record_order_placed() {
    if let Some(metrics) = metrics() {
        metrics.orders_placed_total.inc();
    }
}

pub(crate) fn record_order_status_change(status: OrderStatus, actor: StatusChangeActor) {
    if let Some(metrics) = metrics() {
        metrics
            .order_status_changes_total
            .with_label_values(&[status.as_str(), actor.as_str()])
            .inc();
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

fn build_metrics() -> Option<Metrics> {
    let registry = Registry::new();

    let requests_total = create(
        "requests_total",
        IntCounterVec::new(
            Opts::new(
                "bazaar_json_http_requests_total",
                "Total HTTP requests partitioned by method, route, status class, and status code.",
            ),
            &["method", "route", "status_class", "status_code"],
        ),
    )?;

    let request_duration_seconds = create(
        "request_duration",
        HistogramVec::new(
            HistogramOpts::new(
                "bazaar_json_http_request_duration_seconds",
                "HTTP request duration in seconds partitioned by method and route.",
            )
            .buckets(vec![
                0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ]),
            &["method", "route"],
        ),
    )?;

    let requests_in_flight = create(
        "in-flight gauge",
        IntGauge::with_opts(Opts::new(
            "bazaar_json_http_requests_in_flight",
            "Current number of in-flight HTTP requests.",
        )),
    )?;

    let registrations_total = create(
        "registrations_total",
        IntCounterVec::new(
            Opts::new(
                "bazaar_registrations_total",
                "Accounts registered, partitioned by the role they were given.",
            ),
            &["role"],
        ),
    )?;

    let orders_placed_total = create(
        "orders_placed_total",
        IntCounter::new("bazaar_orders_placed_total", "Orders placed by customers."),
    )?;

    let order_status_changes_total = create(
        "order_status_changes_total",
        IntCounterVec::new(
            Opts::new(
                "bazaar_order_status_changes_total",
                "Order status changes, partitioned by target status and who made them.",
            ),
            &["status", "actor"],
        ),
    )?;

    register(&registry, "requests_total", &requests_total)?;
    register(&registry, "request_duration", &request_duration_seconds)?;
    register(&registry, "in-flight gauge", &requests_in_flight)?;
    register(&registry, "registrations_total", &registrations_total)?;
    register(&registry, "orders_placed_total", &orders_placed_total)?;
    register(
        &registry,
        "order_status_changes_total",
        &order_status_changes_total,
    )?;

    Some(Metrics {
        registry,
        requests_total,
        request_duration_seconds,
        requests_in_flight,
        registrations_total,
        orders_placed_total,
        order_status_changes_total,
    })
}

fn create<M>(name: &str, metric: prometheus::Result<M>) -> Option<M> {
    match metric {
        Ok(metric) => Some(metric),
        Err(source) => {
            error!("failed to create {name} metric: {source}");
            None
        }
    }
}

fn register<M>(registry: &Registry, name: &str, metric: &M) -> Option<()>
where
    M: Collector + Clone + 'static,
{
    match registry.register(Box::new(metric.clone())) {
        Ok(()) => Some(()),
        Err(source) => {
            error!("failed to register {name} metric: {source}");
            None
        }
    }
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
