//! Repair item API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use super::dto::{CreateRepairItemRequest, RepairItemDto, TotalCostDto, UpdateRepairItemRequest};
use crate::interfaces::http::common::{
    error_response, ok, ApiError, ApiResponse, ApiResult, ValidatedJson,
};
use crate::interfaces::http::router::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/repair-items", post(create_item))
        .route(
            "/repair-items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/repair-items/device/{device_id}", get(list_items_by_device))
        .route("/repair-items/device/{device_id}/total", get(device_total))
}

#[utoipa::path(
    post,
    path = "/api/v1/repair-items",
    tag = "Repair Items",
    security(("bearer_auth" = [])),
    request_body = CreateRepairItemRequest,
    responses(
        (status = 201, description = "Item recorded", body = ApiResponse<RepairItemDto>),
        (status = 400, description = "Missing service name or cost"),
        (status = 404, description = "Device, session or catalog entry not found")
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateRepairItemRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RepairItemDto>>), ApiError> {
    let item = state
        .repair_items
        .create(req.into())
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(item.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/repair-items/{id}",
    tag = "Repair Items",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Repair item ID")),
    request_body = UpdateRepairItemRequest,
    responses(
        (status = 200, description = "Item updated", body = ApiResponse<RepairItemDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateRepairItemRequest>,
) -> ApiResult<RepairItemDto> {
    let item = state
        .repair_items
        .update(id, req.into())
        .await
        .map_err(error_response)?;
    ok(item.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/repair-items/{id}",
    tag = "Repair Items",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Repair item ID")),
    responses(
        (status = 200, description = "Repair item", body = ApiResponse<RepairItemDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<RepairItemDto> {
    let item = state.repair_items.get(id).await.map_err(error_response)?;
    ok(item.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/repair-items/device/{device_id}",
    tag = "Repair Items",
    security(("bearer_auth" = [])),
    params(("device_id" = i32, Path, description = "Device ID")),
    responses((status = 200, description = "Items of the device", body = ApiResponse<Vec<RepairItemDto>>))
)]
pub async fn list_items_by_device(
    State(state): State<AppState>,
    Path(device_id): Path<i32>,
) -> ApiResult<Vec<RepairItemDto>> {
    let items = state
        .repair_items
        .list_by_device(device_id)
        .await
        .map_err(error_response)?;
    ok(items.into_iter().map(RepairItemDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/repair-items/device/{device_id}/total",
    tag = "Repair Items",
    security(("bearer_auth" = [])),
    params(("device_id" = i32, Path, description = "Device ID")),
    responses((status = 200, description = "Sum of item costs", body = ApiResponse<TotalCostDto>))
)]
pub async fn device_total(
    State(state): State<AppState>,
    Path(device_id): Path<i32>,
) -> ApiResult<TotalCostDto> {
    let total_cost = state
        .repair_items
        .total_cost(device_id)
        .await
        .map_err(error_response)?;
    ok(TotalCostDto {
        device_id,
        total_cost,
    })
}

#[utoipa::path(
    delete,
    path = "/api/v1/repair-items/{id}",
    tag = "Repair Items",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Repair item ID")),
    responses(
        (status = 200, description = "Item deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_item(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<()> {
    state.repair_items.delete(id).await.map_err(error_response)?;
    ok(())
}
