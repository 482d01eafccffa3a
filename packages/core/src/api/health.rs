use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
};

/// `GET /health` — liveness probe. Never cached, never authenticated.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, [(header::CACHE_CONTROL, "no-store")], "ok")
}
