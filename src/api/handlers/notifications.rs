use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use super::ApiResponse;
use crate::db::notification_repo;
use crate::errors::AppError;
use crate::metrics::record_request;
use crate::models::Notification;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct MarkAllRead {
    pub updated: u64,
}

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Notification>>>, AppError> {
    record_request("notifications");
    let notifications = notification_repo::get_notifications(&state.db).await?;
    Ok(Json(ApiResponse::ok(notifications)))
}

pub async fn mark_read(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<ApiResponse<Notification>>, AppError> {
    record_request("notifications");
    let Path(id) = id.map_err(|e| AppError::BadRequest(e.body_text()))?;

    match notification_repo::mark_read(&state.db, id).await? {
        Some(notification) => Ok(Json(ApiResponse::ok(notification))),
        None => Err(AppError::NotFound(format!("notification {id} not found"))),
    }
}

pub async fn mark_all_read(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<MarkAllRead>>, AppError> {
    record_request("notifications");
    let updated = notification_repo::mark_all_read(&state.db).await?;
    tracing::info!(updated, "Marked all notifications read");
    Ok(Json(ApiResponse::ok(MarkAllRead { updated })))
}
