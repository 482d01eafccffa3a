//! Greeting CRUD endpoints.
//!
//! Authorization happens in the `/api` route layer. Extractor rejections
//! are mapped to [`AppError::BadRequest`] so every failure carries the
//! JSON `{"error": ...}` body.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use super::AppState;
use crate::error::AppError;
use crate::greetings::{Greeting, GreetingFilter};

#[derive(Debug, Default, Deserialize)]
pub struct GreetingQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Body of `PUT /api/greeting`. Unlike creation, the id is mandatory.
#[derive(Debug, Deserialize)]
pub struct UpdateGreetingRequest {
    pub id: Uuid,
    pub from: String,
    pub to: String,
    pub message: String,
}

impl UpdateGreetingRequest {
    /// The repository only copies `from`/`to`/`message`; the timestamp is
    /// a placeholder and never stored.
    fn into_greeting(self) -> Greeting {
        Greeting {
            id: self.id,
            from: self.from,
            to: self.to,
            message: self.message,
            timestamp: Utc::now(),
        }
    }
}

/// `GET /api/greeting` — every greeting, narrowed by `from` / `to` when given.
pub async fn list_greetings(
    State(state): State<AppState>,
    query: Result<Query<GreetingQuery>, QueryRejection>,
) -> Result<Json<Vec<Greeting>>, AppError> {
    let Query(query) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let filter = GreetingFilter::new(query.from.as_deref(), query.to.as_deref());
    let greetings = state.greetings.get_filtered(&filter).await?;
    Ok(Json(greetings))
}

/// `GET /api/greeting/:id`
pub async fn get_greeting(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Greeting>, AppError> {
    let Path(id) = id.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    state
        .greetings
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Greeting with id: {} not found", id)))
}

/// `POST /api/greeting` — store a greeting and queue its notification.
pub async fn create_greeting(
    State(state): State<AppState>,
    body: Result<Json<Greeting>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(greeting) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    state.greetings.create(greeting).await?;
    Ok(StatusCode::ACCEPTED)
}

/// `PUT /api/greeting` — overwrite from/to/message of an existing greeting.
pub async fn update_greeting(
    State(state): State<AppState>,
    body: Result<Json<UpdateGreetingRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(request) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    state.greetings.update(request.into_greeting()).await?;
    Ok(StatusCode::ACCEPTED)
}
