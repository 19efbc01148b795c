use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;

use super::{query_params, ApiResponse};
use crate::db::corporate_action_repo;
use crate::db::filters::{CorporateActionFilter, CorporateActionParams};
use crate::errors::AppError;
use crate::metrics::record_request;
use crate::models::CorporateAction;
use crate::AppState;

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<CorporateActionParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<CorporateAction>>>, AppError> {
    record_request("corporate_actions");
    let filter = CorporateActionFilter::try_from(query_params(query)?)?;
    let actions = corporate_action_repo::get_corporate_actions(&state.db, &filter).await?;
    Ok(Json(ApiResponse::ok(actions)))
}
