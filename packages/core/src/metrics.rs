//! Prometheus metrics registry for the greeting service.
//!
//! [`AppMetrics`] owns all registered metrics and the [`Registry`] they
//! belong to. Construct it once at startup, wrap in `Arc`, and pass it
//! to the greeting service and the HTTP middleware.
//!
//! Exposed at `GET /metrics` in Prometheus text exposition format
//! (`text/plain; version=0.0.4`). The endpoint is not behind the auth
//! handler so it can be scraped by Prometheus / Grafana agents.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use prometheus::{
    Counter, CounterVec, Gauge, Histogram, HistogramOpts, Opts, Registry,
};

/// All application-level Prometheus metrics.
pub struct AppMetrics {
    /// Total number of greetings created.
    pub greetings_created_total: Counter,
    /// Total number of successful greeting updates.
    pub greetings_updated_total: Counter,
    /// Current number of greetings held by the repository.
    pub greetings_stored: Gauge,
    /// Total number of notifications delivered by the messaging service.
    pub messages_sent_total: Counter,
    /// Total number of failed notification deliveries.
    pub message_errors_total: Counter,
    /// Total number of requests refused by the auth handler.
    pub unauthorized_requests_total: Counter,
    /// HTTP request count, labelled by method, path, and status code.
    pub http_requests_total: CounterVec,
    /// HTTP request latency histogram in seconds.
    pub http_request_duration: Histogram,
    /// The registry that owns all of the above metrics.
    pub registry: Registry,
}

impl AppMetrics {
    /// Create and register all metrics. Returns an error if any metric
    /// name is invalid or duplicated.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let greetings_created_total = Counter::with_opts(Opts::new(
            "greeting_service_greetings_created_total",
            "Total greetings created",
        ))?;

        let greetings_updated_total = Counter::with_opts(Opts::new(
            "greeting_service_greetings_updated_total",
            "Total greetings updated",
        ))?;

        let greetings_stored = Gauge::with_opts(Opts::new(
            "greeting_service_greetings_stored",
            "Current number of stored greetings",
        ))?;

        let messages_sent_total = Counter::with_opts(Opts::new(
            "greeting_service_messages_sent_total",
            "Greeting notifications delivered",
        ))?;

        let message_errors_total = Counter::with_opts(Opts::new(
            "greeting_service_message_errors_total",
            "Greeting notifications that failed to deliver",
        ))?;

        let unauthorized_requests_total = Counter::with_opts(Opts::new(
            "greeting_service_unauthorized_requests_total",
            "Requests refused by the auth handler",
        ))?;

        let http_requests_total = CounterVec::new(
            Opts::new(
                "greeting_service_http_requests_total",
                "HTTP requests by method, path, and status",
            ),
            &["method", "path", "status"],
        )?;

        let http_request_duration = Histogram::with_opts(
            HistogramOpts::new(
                "greeting_service_http_request_duration_seconds",
                "HTTP request latency in seconds",
            )
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),
        )?;

        registry.register(Box::new(greetings_created_total.clone()))?;
        registry.register(Box::new(greetings_updated_total.clone()))?;
        registry.register(Box::new(greetings_stored.clone()))?;
        registry.register(Box::new(messages_sent_total.clone()))?;
        registry.register(Box::new(message_errors_total.clone()))?;
        registry.register(Box::new(unauthorized_requests_total.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration.clone()))?;

        Ok(Self {
            greetings_created_total,
            greetings_updated_total,
            greetings_stored,
            messages_sent_total,
            message_errors_total,
            unauthorized_requests_total,
            http_requests_total,
            http_request_duration,
            registry,
        })
    }

    /// Render all metrics as Prometheus text format (for the `/metrics` endpoint).
    pub fn render(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buf = Vec::new();
        encoder.encode(&metric_families, &mut buf)?;
        Ok(String::from_utf8(buf).unwrap_or_default())
    }
}

/// Axum middleware recording request count and latency.
///
/// The `path` label uses the matched route template (`/api/greeting/:id`)
/// rather than the raw URI so ids do not explode label cardinality.
pub async fn track_http(
    State(metrics): State<Arc<AppMetrics>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let started = Instant::now();
    let response = next.run(request).await;
    let status = response.status().as_u16().to_string();

    metrics
        .http_requests_total
        .with_label_values(&[method.as_str(), path.as_str(), status.as_str()])
        .inc();
    metrics
        .http_request_duration
        .observe(started.elapsed().as_secs_f64());

    response
}


#[cfg(test)]
mod integration_tests {
    use super::*;

    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn make_tracked_app() -> (Router, Arc<AppMetrics>) {
        let metrics = Arc::new(AppMetrics::new().unwrap());
        let app = Router::new()
            .route("/things/:id", get(|| async { "thing" }))
            .layer(middleware::from_fn_with_state(metrics.clone(), track_http));
        (app, metrics)
    }

    #[tokio::test]
    async fn middleware_counts_requests_by_route_template() {
        let (app, metrics) = make_tracked_app();
        let req = Request::builder()
            .method(Method::GET)
            .uri("/things/42")
            .body(Body::empty())
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"thing");

        let val = metrics
            .http_requests_total
            .with_label_values(&["GET", "/things/:id", "200"])
            .get();
        assert!((val - 1.0).abs() < f64::EPSILON);
        assert_eq!(metrics.http_request_duration.get_sample_count(), 1);
    }
}
