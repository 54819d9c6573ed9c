//! Audit log API handlers

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};

use super::dto::{LogFilterParams, RealtimeLogDto};
use crate::domain::ActionType;
use crate::interfaces::http::common::{error_response, ok, ApiResponse, ApiResult};
use crate::interfaces::http::router::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/logs/device/{device_id}", get(list_device_logs))
}

#[utoipa::path(
    get,
    path = "/api/v1/logs/device/{device_id}",
    tag = "Logs",
    security(("bearer_auth" = [])),
    params(("device_id" = i32, Path, description = "Device ID"), LogFilterParams),
    responses(
        (status = 200, description = "Log entries, newest first", body = ApiResponse<Vec<RealtimeLogDto>>),
        (status = 404, description = "Device not found")
    )
)]
pub async fn list_device_logs(
    State(state): State<AppState>,
    Path(device_id): Path<i32>,
    Query(filter): Query<LogFilterParams>,
) -> ApiResult<Vec<RealtimeLogDto>> {
    let action = filter
        .action
        .filter(|a| !a.trim().is_empty())
        .map(|a| a.parse::<ActionType>())
        .transpose()
        .map_err(error_response)?;
    let logs = state
        .logs
        .list_by_device(device_id, action)
        .await
        .map_err(error_response)?;
    ok(logs.into_iter().map(RealtimeLogDto::from).collect())
}
