//! Device API handlers
//!
//! Every response carries the billing aggregate, recomputed per request.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{delete, get, patch},
    Json, Router,
};

use super::dto::{AssignRequest, ChangeStatusRequest, CreateDeviceRequest, DeviceDto, UpdateDeviceRequest};
use crate::application::services::{CreateDevice, UpdateDevice};
use crate::domain::DeviceStatus;
use crate::interfaces::http::common::{
    error_response, ok, ApiError, ApiResponse, ApiResult, PaginatedResponse, PaginationParams,
    ValidatedJson,
};
use crate::interfaces::http::middleware::{require_roles, roles, AuthenticatedUser};
use crate::interfaces::http::router::AppState;

pub fn routes() -> Router<AppState> {
    let staff = Router::new()
        .route("/devices", get(list_devices).post(create_device))
        .route("/devices/{id}", get(get_device).put(update_device))
        .route("/devices/{id}/status", patch(change_status))
        .route("/devices/{id}/assign", patch(assign_device));

    let admin = Router::new()
        .route("/devices/{id}", delete(delete_device))
        .route_layer(middleware::from_fn_with_state(roles::ADMIN, require_roles));

    staff.merge(admin)
}

fn parse_status(status: Option<String>) -> Result<Option<DeviceStatus>, ApiError> {
    status
        .map(|s| s.parse::<DeviceStatus>())
        .transpose()
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/api/v1/devices",
    tag = "Devices",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses((status = 200, description = "Device list", body = ApiResponse<PaginatedResponse<DeviceDto>>))
)]
pub async fn list_devices(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<PaginatedResponse<DeviceDto>> {
    let result = state
        .devices
        .list(params.into())
        .await
        .map_err(error_response)?;
    ok(PaginatedResponse::from_result(result, DeviceDto::from))
}

#[utoipa::path(
    get,
    path = "/api/v1/devices/{id}",
    tag = "Devices",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Device ID")),
    responses(
        (status = 200, description = "Device with billing totals", body = ApiResponse<DeviceDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_device(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<DeviceDto> {
    let details = state.devices.get(id).await.map_err(error_response)?;
    ok(details.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/devices",
    tag = "Devices",
    security(("bearer_auth" = [])),
    request_body = CreateDeviceRequest,
    responses(
        (status = 201, description = "Device received", body = ApiResponse<DeviceDto>),
        (status = 404, description = "Referenced customer, brand, model or user not found")
    )
)]
pub async fn create_device(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(req): ValidatedJson<CreateDeviceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DeviceDto>>), ApiError> {
    let input = CreateDevice {
        customer_id: req.customer_id,
        brand_id: req.brand_id,
        model_id: req.model_id,
        imei: req.imei,
        color: req.color,
        status: parse_status(req.status)?,
        received_date: req.received_date,
        expected_return_date: req.expected_return_date,
        note: req.note,
        assigned_to: req.assigned_to,
    };
    let details = state
        .devices
        .create(&user.user_id, input)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(details.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/devices/{id}",
    tag = "Devices",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Device ID")),
    request_body = UpdateDeviceRequest,
    responses(
        (status = 200, description = "Device updated", body = ApiResponse<DeviceDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_device(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateDeviceRequest>,
) -> ApiResult<DeviceDto> {
    let input = UpdateDevice {
        customer_id: req.customer_id,
        brand_id: req.brand_id,
        model_id: req.model_id,
        imei: req.imei,
        color: req.color,
        status: parse_status(req.status)?,
        expected_return_date: req.expected_return_date,
        note: req.note,
        assigned_to: req.assigned_to,
    };
    let details = state
        .devices
        .update(&user.user_id, id, input)
        .await
        .map_err(error_response)?;
    ok(details.into())
}

#[utoipa::path(
    patch,
    path = "/api/v1/devices/{id}/status",
    tag = "Devices",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Device ID")),
    request_body = ChangeStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<DeviceDto>),
        (status = 400, description = "Unknown status")
    )
)]
pub async fn change_status(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(req): Json<ChangeStatusRequest>,
) -> ApiResult<DeviceDto> {
    let status = req.status.parse::<DeviceStatus>().map_err(error_response)?;
    let details = state
        .devices
        .change_status(&user.user_id, id, status)
        .await
        .map_err(error_response)?;
    ok(details.into())
}

#[utoipa::path(
    patch,
    path = "/api/v1/devices/{id}/assign",
    tag = "Devices",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Device ID")),
    request_body = AssignRequest,
    responses(
        (status = 200, description = "Assignment changed", body = ApiResponse<DeviceDto>),
        (status = 404, description = "Device or user not found")
    )
)]
pub async fn assign_device(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i32>,
    Json(req): Json<AssignRequest>,
) -> ApiResult<DeviceDto> {
    let details = state
        .devices
        .assign(&user.user_id, id, req.assigned_to)
        .await
        .map_err(error_response)?;
    ok(details.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/devices/{id}",
    tag = "Devices",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Device ID")),
    responses(
        (status = 200, description = "Device and all its records deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_device(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<()> {
    state.devices.delete(id).await.map_err(error_response)?;
    ok(())
}
