use axum::extract::State;
use axum::Json;

use super::ApiResponse;
use crate::errors::AppError;
use crate::metrics::record_request;
use crate::services::dashboard::{self, DashboardSummary};
use crate::AppState;

pub async fn summary(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardSummary>>, AppError> {
    record_request("dashboard_summary");
    let summary = dashboard::build_summary(&state.db).await?;
    Ok(Json(ApiResponse::ok(summary)))
}
