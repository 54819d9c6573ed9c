//! Device model API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};

use super::dto::{
    CreateDeviceModelRequest, DeviceModelDto, DeviceTypeParams, UpdateDeviceModelRequest,
};
use crate::interfaces::http::common::{
    error_response, ok, ApiError, ApiResponse, ApiResult, ValidatedJson,
};
use crate::interfaces::http::middleware::{require_roles, roles};
use crate::interfaces::http::router::AppState;

pub fn routes() -> Router<AppState> {
    let staff = Router::new()
        .route("/brands/{brand_id}/models", get(list_models_by_brand))
        .route("/device-models", get(list_models_by_type))
        .route("/device-models/{id}", get(get_model));

    let admin = Router::new()
        .route("/brands/{brand_id}/models", post(create_model))
        .route("/device-models/{id}", put(update_model).delete(delete_model))
        .route_layer(middleware::from_fn_with_state(roles::ADMIN, require_roles));

    staff.merge(admin)
}

#[utoipa::path(
    get,
    path = "/api/v1/brands/{brand_id}/models",
    tag = "Device Models",
    security(("bearer_auth" = [])),
    params(("brand_id" = i32, Path, description = "Brand ID")),
    responses(
        (status = 200, description = "Active models of the brand", body = ApiResponse<Vec<DeviceModelDto>>),
        (status = 404, description = "Brand not found")
    )
)]
pub async fn list_models_by_brand(
    State(state): State<AppState>,
    Path(brand_id): Path<i32>,
) -> ApiResult<Vec<DeviceModelDto>> {
    let models = state
        .device_models
        .list_active_by_brand(brand_id)
        .await
        .map_err(error_response)?;
    ok(models.into_iter().map(DeviceModelDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/device-models",
    tag = "Device Models",
    security(("bearer_auth" = [])),
    params(DeviceTypeParams),
    responses((status = 200, description = "Models of a device type", body = ApiResponse<Vec<DeviceModelDto>>))
)]
pub async fn list_models_by_type(
    State(state): State<AppState>,
    Query(params): Query<DeviceTypeParams>,
) -> ApiResult<Vec<DeviceModelDto>> {
    let models = state
        .device_models
        .list_by_device_type(&params.device_type)
        .await
        .map_err(error_response)?;
    ok(models.into_iter().map(DeviceModelDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/device-models/{id}",
    tag = "Device Models",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Model ID")),
    responses(
        (status = 200, description = "Model", body = ApiResponse<DeviceModelDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_model(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<DeviceModelDto> {
    let model = state.device_models.get(id).await.map_err(error_response)?;
    ok(model.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/brands/{brand_id}/models",
    tag = "Device Models",
    security(("bearer_auth" = [])),
    params(("brand_id" = i32, Path, description = "Brand ID")),
    request_body = CreateDeviceModelRequest,
    responses(
        (status = 201, description = "Model created", body = ApiResponse<DeviceModelDto>),
        (status = 404, description = "Brand not found"),
        (status = 409, description = "Name already used by this brand")
    )
)]
pub async fn create_model(
    State(state): State<AppState>,
    Path(brand_id): Path<i32>,
    ValidatedJson(req): ValidatedJson<CreateDeviceModelRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DeviceModelDto>>), ApiError> {
    let model = state
        .device_models
        .create(brand_id, req.into())
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(model.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/device-models/{id}",
    tag = "Device Models",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Model ID")),
    request_body = UpdateDeviceModelRequest,
    responses(
        (status = 200, description = "Model updated", body = ApiResponse<DeviceModelDto>),
        (status = 409, description = "Name already used by this brand")
    )
)]
pub async fn update_model(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateDeviceModelRequest>,
) -> ApiResult<DeviceModelDto> {
    let model = state
        .device_models
        .update(id, req.into())
        .await
        .map_err(error_response)?;
    ok(model.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/device-models/{id}",
    tag = "Device Models",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Model ID")),
    responses((status = 200, description = "Model deleted"))
)]
pub async fn delete_model(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<()> {
    state.device_models.delete(id).await.map_err(error_response)?;
    ok(())
}
