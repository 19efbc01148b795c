pub mod corporate_actions;
pub mod customers;
pub mod dashboard;
pub mod health;
pub mod history;
pub mod metrics;
pub mod notifications;
pub mod trades;

use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use serde::Serialize;

use crate::errors::AppError;

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Malformed query strings get the same error envelope as failed filters.
pub(crate) fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(params)| params)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}
