//! Repair session API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};

use super::dto::{CreateRepairSessionRequest, RepairSessionDto, UpdateRepairSessionRequest};
use crate::application::services::{CreateRepairSession, UpdateRepairSession};
use crate::domain::DeviceStatus;
use crate::interfaces::http::common::{
    error_response, ok, ApiError, ApiResponse, ApiResult, PaginatedResponse, PaginationParams,
    ValidatedJson,
};
use crate::interfaces::http::middleware::{require_roles, roles, AuthenticatedUser};
use crate::interfaces::http::router::AppState;

pub fn routes() -> Router<AppState> {
    let staff = Router::new()
        .route("/repair-sessions", get(list_sessions))
        .route("/repair-sessions/{id}", get(get_session).put(update_session))
        .route("/repair-sessions/device/{device_id}", get(list_sessions_by_device));

    let front = Router::new()
        .route("/repair-sessions", post(create_session))
        .route_layer(middleware::from_fn_with_state(roles::FRONT, require_roles));

    staff.merge(front)
}

fn parse_status(status: Option<String>) -> Result<Option<DeviceStatus>, ApiError> {
    status
        .map(|s| s.parse::<DeviceStatus>())
        .transpose()
        .map_err(error_response)
}

#[utoipa::path(
    post,
    path = "/api/v1/repair-sessions",
    tag = "Repair Sessions",
    security(("bearer_auth" = [])),
    request_body = CreateRepairSessionRequest,
    responses(
        (status = 201, description = "Session opened", body = ApiResponse<RepairSessionDto>),
        (status = 404, description = "Device not found")
    )
)]
pub async fn create_session(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(req): ValidatedJson<CreateRepairSessionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RepairSessionDto>>), ApiError> {
    let input = CreateRepairSession {
        device_id: req.device_id,
        status: parse_status(req.status)?,
        received_date: req.received_date,
        expected_return_date: req.expected_return_date,
        note: req.note,
        assigned_to: req.assigned_to,
    };
    let session = state
        .repair_sessions
        .create(&user.user_id, input)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(session.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/repair-sessions/{id}",
    tag = "Repair Sessions",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Session ID")),
    request_body = UpdateRepairSessionRequest,
    responses(
        (status = 200, description = "Session updated", body = ApiResponse<RepairSessionDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_session(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateRepairSessionRequest>,
) -> ApiResult<RepairSessionDto> {
    let input = UpdateRepairSession {
        status: parse_status(req.status)?,
        received_date: req.received_date,
        expected_return_date: req.expected_return_date,
        note: req.note,
        assigned_to: req.assigned_to,
    };
    let session = state
        .repair_sessions
        .update(id, input)
        .await
        .map_err(error_response)?;
    ok(session.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/repair-sessions/{id}",
    tag = "Repair Sessions",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session", body = ApiResponse<RepairSessionDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<RepairSessionDto> {
    let session = state.repair_sessions.get(id).await.map_err(error_response)?;
    ok(session.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/repair-sessions/device/{device_id}",
    tag = "Repair Sessions",
    security(("bearer_auth" = [])),
    params(("device_id" = i32, Path, description = "Device ID")),
    responses((status = 200, description = "Sessions of the device, newest first", body = ApiResponse<Vec<RepairSessionDto>>))
)]
pub async fn list_sessions_by_device(
    State(state): State<AppState>,
    Path(device_id): Path<i32>,
) -> ApiResult<Vec<RepairSessionDto>> {
    let sessions = state
        .repair_sessions
        .list_by_device(device_id)
        .await
        .map_err(error_response)?;
    ok(sessions.into_iter().map(RepairSessionDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/repair-sessions",
    tag = "Repair Sessions",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses((status = 200, description = "Sessions", body = ApiResponse<PaginatedResponse<RepairSessionDto>>))
)]
pub async fn list_sessions(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<PaginatedResponse<RepairSessionDto>> {
    let result = state
        .repair_sessions
        .list(params.into())
        .await
        .map_err(error_response)?;
    ok(PaginatedResponse::from_result(result, RepairSessionDto::from))
}
