use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;

use super::{query_params, ApiResponse};
use crate::db::filters::{TradeFilter, TradeParams};
use crate::db::trade_repo;
use crate::errors::AppError;
use crate::metrics::record_request;
use crate::models::Trade;
use crate::AppState;

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<TradeParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Trade>>>, AppError> {
    record_request("trades");
    let filter = TradeFilter::try_from(query_params(query)?)?;
    let trades = trade_repo::get_trades(&state.db, &filter).await?;
    Ok(Json(ApiResponse::ok(trades)))
}
