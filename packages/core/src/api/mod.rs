//! HTTP entry points.
//!
//! Routes:
//! - `GET  /health`                    — liveness, no auth
//! - `GET  /metrics`                   — Prometheus text, no auth
//! - `GET  /api/greeting`              — list, optional `?from=&to=` filter
//! - `GET  /api/greeting/:id`          — single greeting
//! - `POST /api/greeting`              — create (202)
//! - `PUT  /api/greeting`              — update (202)
//! - `GET  /api/invoice/:year/:month`  — monthly invoices
//!
//! Every `/api` route sits behind [`require_auth`], which asks the
//! [`AuthHandler`] before any extractor runs and answers 401 when refused.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;

use crate::auth::AuthHandler;
use crate::error::AppError;
use crate::greetings::GreetingService;
use crate::invoices::InvoiceService;
use crate::metrics::{track_http, AppMetrics};

pub mod greetings;
pub mod health;
pub mod invoices;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub greetings: Arc<GreetingService>,
    pub invoices: Arc<dyn InvoiceService>,
    pub auth: Arc<dyn AuthHandler>,
    pub metrics: Arc<AppMetrics>,
}

impl AppState {
    /// Reject the request unless the auth handler approves its headers.
    pub async fn authorize(&self, headers: &HeaderMap) -> Result<(), AppError> {
        if self.auth.is_authorized(headers).await {
            Ok(())
        } else {
            self.metrics.unauthorized_requests_total.inc();
            tracing::warn!("Rejected unauthorized request");
            Err(AppError::Unauthorized)
        }
    }
}

/// Assemble the full application router.
pub fn create_router(state: AppState) -> Router {
    let metrics = state.metrics.clone();

    let api = Router::new()
        .route(
            "/api/greeting",
            get(greetings::list_greetings)
                .post(greetings::create_greeting)
                .put(greetings::update_greeting),
        )
        .route("/api/greeting/:id", get(greetings::get_greeting))
        .route("/api/invoice/:year/:month", get(invoices::get_invoices))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health::health))
        .route("/metrics", get(render_metrics))
        .merge(api)
        .with_state(state)
        .layer(middleware::from_fn_with_state(metrics, track_http))
        .layer(CorsLayer::permissive())
}

/// Authorization gate for `/api` routes. Runs ahead of the handler's
/// extractors so a refused caller never sees a body or path rejection.
pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    state.authorize(request.headers()).await?;
    Ok(next.run(request).await)
}

async fn render_metrics(State(state): State<AppState>) -> Result<Response, AppError> {
    let body = state
        .metrics
        .render()
        .map_err(|err| AppError::Internal(format!("Failed to render metrics: {}", err)))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; version=0.0.4")
        .body(Body::from(body))
        .map_err(|err| AppError::Internal(err.to_string()))
}
