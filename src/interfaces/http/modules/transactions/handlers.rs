//! Payment API handlers
//!
//! Reads are open to all staff; writes and revenue reports are admin only.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};

use super::dto::{RevenueDto, TransactionDto, TransactionRequest};
use crate::interfaces::http::common::{
    error_response, ok, ApiError, ApiResponse, ApiResult, DateRangeParams, PaginatedResponse,
    PaginationParams, ValidatedJson,
};
use crate::interfaces::http::middleware::{require_roles, roles};
use crate::interfaces::http::router::AppState;

pub fn routes() -> Router<AppState> {
    let staff = Router::new()
        .route("/transactions", get(list_transactions))
        .route("/transactions/{id}", get(get_transaction))
        .route(
            "/transactions/device/{device_id}",
            get(list_transactions_by_device),
        );

    let admin = Router::new()
        .route("/transactions", post(create_transaction))
        .route(
            "/transactions/{id}",
            put(update_transaction).delete(delete_transaction),
        )
        .route("/transactions/revenue", get(revenue))
        .route_layer(middleware::from_fn_with_state(roles::ADMIN, require_roles));

    staff.merge(admin)
}

#[utoipa::path(
    post,
    path = "/api/v1/transactions",
    tag = "Transactions",
    security(("bearer_auth" = [])),
    request_body = TransactionRequest,
    responses(
        (status = 201, description = "Payment recorded", body = ApiResponse<TransactionDto>),
        (status = 400, description = "Device already has a payment or discount exceeds total")
    )
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<TransactionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TransactionDto>>), ApiError> {
    let input = req.into_input().map_err(error_response)?;
    let tx = state
        .transactions
        .create(input)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(tx.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/transactions/{id}",
    tag = "Transactions",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Transaction ID")),
    request_body = TransactionRequest,
    responses(
        (status = 200, description = "Payment updated", body = ApiResponse<TransactionDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_transaction(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<TransactionRequest>,
) -> ApiResult<TransactionDto> {
    let input = req.into_input().map_err(error_response)?;
    let tx = state
        .transactions
        .update(id, input)
        .await
        .map_err(error_response)?;
    ok(tx.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/transactions/{id}",
    tag = "Transactions",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "Payment", body = ApiResponse<TransactionDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<TransactionDto> {
    let tx = state.transactions.get(id).await.map_err(error_response)?;
    ok(tx.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/transactions",
    tag = "Transactions",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses((status = 200, description = "Payments", body = ApiResponse<PaginatedResponse<TransactionDto>>))
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<PaginatedResponse<TransactionDto>> {
    let result = state
        .transactions
        .list(params.into())
        .await
        .map_err(error_response)?;
    ok(PaginatedResponse::from_result(result, TransactionDto::from))
}

#[utoipa::path(
    get,
    path = "/api/v1/transactions/device/{device_id}",
    tag = "Transactions",
    security(("bearer_auth" = [])),
    params(("device_id" = i32, Path, description = "Device ID")),
    responses((status = 200, description = "Payments of the device", body = ApiResponse<Vec<TransactionDto>>))
)]
pub async fn list_transactions_by_device(
    State(state): State<AppState>,
    Path(device_id): Path<i32>,
) -> ApiResult<Vec<TransactionDto>> {
    let txs = state
        .transactions
        .list_by_device(device_id)
        .await
        .map_err(error_response)?;
    ok(txs.into_iter().map(TransactionDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/transactions/revenue",
    tag = "Transactions",
    security(("bearer_auth" = [])),
    params(DateRangeParams),
    responses(
        (status = 200, description = "Sum of final amounts in the window", body = ApiResponse<RevenueDto>),
        (status = 400, description = "End before start")
    )
)]
pub async fn revenue(
    State(state): State<AppState>,
    Query(range): Query<DateRangeParams>,
) -> ApiResult<RevenueDto> {
    let revenue = state
        .transactions
        .revenue(range.start, range.end)
        .await
        .map_err(error_response)?;
    ok(RevenueDto {
        start: range.start,
        end: range.end,
        revenue,
    })
}

#[utoipa::path(
    delete,
    path = "/api/v1/transactions/{id}",
    tag = "Transactions",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "Payment deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<()> {
    state.transactions.delete(id).await.map_err(error_response)?;
    ok(())
}
