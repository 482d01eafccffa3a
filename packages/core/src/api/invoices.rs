use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

use super::AppState;
use crate::error::AppError;
use crate::invoices::Invoice;

/// `GET /api/invoice/:year/:month`
pub async fn get_invoices(
    State(state): State<AppState>,
    period: Result<Path<(i32, u32)>, PathRejection>,
) -> Result<Json<Vec<Invoice>>, AppError> {
    let Path((year, month)) =
        period.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let invoices = state.invoices.get_invoices(year, month).await?;
    Ok(Json(invoices))
}
