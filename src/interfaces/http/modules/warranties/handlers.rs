//! Warranty API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use super::dto::{CreateWarrantyRequest, UpdateWarrantyRequest, WarrantyDto};
use crate::domain::Warranty;
use crate::interfaces::http::common::{
    error_response, ok, ApiError, ApiResponse, ApiResult, DateRangeParams, ValidatedJson,
};
use crate::interfaces::http::router::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/warranties", post(create_warranty))
        .route(
            "/warranties/{id}",
            get(get_warranty).put(update_warranty).delete(delete_warranty),
        )
        .route("/warranties/code/{code}", get(get_warranty_by_code))
        .route("/warranties/device/{device_id}", get(list_warranties_by_device))
        .route("/warranties/expiring", get(list_expiring))
        .route("/warranties/expired", get(list_expired))
}

fn to_dtos(warranties: Vec<Warranty>) -> Vec<WarrantyDto> {
    warranties.into_iter().map(WarrantyDto::from).collect()
}

#[utoipa::path(
    post,
    path = "/api/v1/warranties",
    tag = "Warranties",
    security(("bearer_auth" = [])),
    request_body = CreateWarrantyRequest,
    responses(
        (status = 201, description = "Warranty issued", body = ApiResponse<WarrantyDto>),
        (status = 400, description = "Item belongs to another device"),
        (status = 404, description = "Device, session or item not found")
    )
)]
pub async fn create_warranty(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateWarrantyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<WarrantyDto>>), ApiError> {
    let warranty = state
        .warranties
        .create(req.into())
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(warranty.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/warranties/{id}",
    tag = "Warranties",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Warranty ID")),
    request_body = UpdateWarrantyRequest,
    responses(
        (status = 200, description = "Warranty updated", body = ApiResponse<WarrantyDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_warranty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateWarrantyRequest>,
) -> ApiResult<WarrantyDto> {
    let warranty = state
        .warranties
        .update(id, req.into())
        .await
        .map_err(error_response)?;
    ok(warranty.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/warranties/{id}",
    tag = "Warranties",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Warranty ID")),
    responses(
        (status = 200, description = "Warranty", body = ApiResponse<WarrantyDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_warranty(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<WarrantyDto> {
    let warranty = state.warranties.get(id).await.map_err(error_response)?;
    ok(warranty.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/warranties/code/{code}",
    tag = "Warranties",
    security(("bearer_auth" = [])),
    params(("code" = String, Path, description = "Warranty code, case-insensitive")),
    responses(
        (status = 200, description = "Warranty", body = ApiResponse<WarrantyDto>),
        (status = 404, description = "Unknown code")
    )
)]
pub async fn get_warranty_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<WarrantyDto> {
    let warranty = state
        .warranties
        .get_by_code(&code)
        .await
        .map_err(error_response)?;
    ok(warranty.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/warranties/device/{device_id}",
    tag = "Warranties",
    security(("bearer_auth" = [])),
    params(("device_id" = i32, Path, description = "Device ID")),
    responses((status = 200, description = "Warranties of the device", body = ApiResponse<Vec<WarrantyDto>>))
)]
pub async fn list_warranties_by_device(
    State(state): State<AppState>,
    Path(device_id): Path<i32>,
) -> ApiResult<Vec<WarrantyDto>> {
    let warranties = state
        .warranties
        .list_by_device(device_id)
        .await
        .map_err(error_response)?;
    ok(to_dtos(warranties))
}

#[utoipa::path(
    get,
    path = "/api/v1/warranties/expiring",
    tag = "Warranties",
    security(("bearer_auth" = [])),
    params(DateRangeParams),
    responses((status = 200, description = "Warranties ending inside the window", body = ApiResponse<Vec<WarrantyDto>>))
)]
pub async fn list_expiring(
    State(state): State<AppState>,
    Query(range): Query<DateRangeParams>,
) -> ApiResult<Vec<WarrantyDto>> {
    let warranties = state
        .warranties
        .expiring_between(range.start, range.end)
        .await
        .map_err(error_response)?;
    ok(to_dtos(warranties))
}

#[utoipa::path(
    get,
    path = "/api/v1/warranties/expired",
    tag = "Warranties",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Warranties already past their end date", body = ApiResponse<Vec<WarrantyDto>>))
)]
pub async fn list_expired(State(state): State<AppState>) -> ApiResult<Vec<WarrantyDto>> {
    let warranties = state.warranties.expired().await.map_err(error_response)?;
    ok(to_dtos(warranties))
}

#[utoipa::path(
    delete,
    path = "/api/v1/warranties/{id}",
    tag = "Warranties",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Warranty ID")),
    responses(
        (status = 200, description = "Warranty deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_warranty(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<()> {
    state.warranties.delete(id).await.map_err(error_response)?;
    ok(())
}
