//! Brand API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};

use super::dto::{BrandDto, CreateBrandRequest, UpdateBrandRequest};
use crate::interfaces::http::common::{
    error_response, ok, ApiError, ApiResponse, ApiResult, PaginatedResponse, PaginationParams,
    ValidatedJson,
};
use crate::interfaces::http::middleware::{require_roles, roles};
use crate::interfaces::http::router::AppState;

pub fn routes() -> Router<AppState> {
    let staff = Router::new()
        .route("/brands", get(list_brands))
        .route("/brands/active", get(list_active_brands))
        .route("/brands/{id}", get(get_brand));

    let admin = Router::new()
        .route("/brands", post(create_brand))
        .route("/brands/{id}", put(update_brand).delete(delete_brand))
        .route_layer(middleware::from_fn_with_state(roles::ADMIN, require_roles));

    staff.merge(admin)
}

#[utoipa::path(
    get,
    path = "/api/v1/brands",
    tag = "Brands",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses((status = 200, description = "Brand list", body = ApiResponse<PaginatedResponse<BrandDto>>))
)]
pub async fn list_brands(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<PaginatedResponse<BrandDto>> {
    let result = state
        .brands
        .list(params.into())
        .await
        .map_err(error_response)?;
    ok(PaginatedResponse::from_result(result, BrandDto::from))
}

#[utoipa::path(
    get,
    path = "/api/v1/brands/active",
    tag = "Brands",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Active brands", body = ApiResponse<Vec<BrandDto>>))
)]
pub async fn list_active_brands(State(state): State<AppState>) -> ApiResult<Vec<BrandDto>> {
    let brands = state.brands.list_active().await.map_err(error_response)?;
    ok(brands.into_iter().map(BrandDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/brands/{id}",
    tag = "Brands",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Brand ID")),
    responses(
        (status = 200, description = "Brand", body = ApiResponse<BrandDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_brand(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<BrandDto> {
    let brand = state.brands.get(id).await.map_err(error_response)?;
    ok(brand.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/brands",
    tag = "Brands",
    security(("bearer_auth" = [])),
    request_body = CreateBrandRequest,
    responses(
        (status = 201, description = "Brand created", body = ApiResponse<BrandDto>),
        (status = 409, description = "Name already exists")
    )
)]
pub async fn create_brand(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateBrandRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BrandDto>>), ApiError> {
    let brand = state
        .brands
        .create(&req.name, req.description)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(brand.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/brands/{id}",
    tag = "Brands",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Brand ID")),
    request_body = UpdateBrandRequest,
    responses(
        (status = 200, description = "Brand updated", body = ApiResponse<BrandDto>),
        (status = 409, description = "Name already exists")
    )
)]
pub async fn update_brand(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateBrandRequest>,
) -> ApiResult<BrandDto> {
    let brand = state
        .brands
        .update(id, req.into())
        .await
        .map_err(error_response)?;
    ok(brand.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/brands/{id}",
    tag = "Brands",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Brand ID")),
    responses((status = 200, description = "Brand deleted"))
)]
pub async fn delete_brand(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<()> {
    state.brands.delete(id).await.map_err(error_response)?;
    ok(())
}
