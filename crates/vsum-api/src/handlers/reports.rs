//! JSON access to the report table.

use axum::extract::{Path, State};
use axum::Json;
use vsum_models::ReportRecord;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// All report rows.
pub async fn list_reports(State(state): State<AppState>) -> ApiResult<Json<Vec<ReportRecord>>> {
    Ok(Json(state.reports.list_reports().await?))
}

/// One report row by video file name.
pub async fn get_report(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> ApiResult<Json<ReportRecord>> {
    state
        .reports
        .get_report(&file_name)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("No report for {}", file_name)))
}
