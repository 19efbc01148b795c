use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;

use super::{query_params, ApiResponse};
use crate::db::customer_repo;
use crate::db::filters::{AccountParams, CustomerParams};
use crate::errors::AppError;
use crate::metrics::record_request;
use crate::models::{Account, Customer};
use crate::AppState;

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<CustomerParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Customer>>>, AppError> {
    record_request("customers");
    let customers = match query_params(query)?.status()? {
        Some(status) => customer_repo::get_customers_by_status(&state.db, status).await?,
        None => customer_repo::get_customers(&state.db).await?,
    };
    Ok(Json(ApiResponse::ok(customers)))
}

pub async fn accounts(
    State(state): State<AppState>,
    query: Result<Query<AccountParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Account>>>, AppError> {
    record_request("accounts");
    let accounts = match query_params(query)?.customer_id()? {
        Some(customer_id) => customer_repo::get_accounts_by_customer(&state.db, customer_id).await?,
        None => customer_repo::get_accounts(&state.db).await?,
    };
    Ok(Json(ApiResponse::ok(accounts)))
}
