use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;

use super::{query_params, ApiResponse};
use crate::db::filters::{HistoryFilter, HistoryParams};
use crate::db::history_repo;
use crate::errors::AppError;
use crate::metrics::record_request;
use crate::models::{AucSnapshot, TradesByAsset};
use crate::AppState;

/// Daily AUC snapshots in ascending date order. `assetClass` is accepted
/// but does not narrow the rows; each snapshot carries every class.
pub async fn assets_under_custody(
    State(state): State<AppState>,
    query: Result<Query<HistoryParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<AucSnapshot>>>, AppError> {
    record_request("assets_under_custody");
    let filter = HistoryFilter::try_from(query_params(query)?)?;
    let rows = history_repo::get_auc(&state.db, &filter).await?;
    Ok(Json(ApiResponse::ok(rows)))
}

/// Rows are labelled Equities, Fixed Income, Commodities, FX and Funds,
/// the same set trades use. `assetClass` also accepts the singular forms.
pub async fn trades_by_asset(
    State(state): State<AppState>,
    query: Result<Query<HistoryParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<TradesByAsset>>>, AppError> {
    record_request("trades_by_asset");
    let filter = HistoryFilter::try_from(query_params(query)?)?;
    let rows = history_repo::get_trades_by_asset(&state.db, &filter).await?;
    Ok(Json(ApiResponse::ok(rows)))
}
