//! Service catalog API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};

use super::dto::{CreateServiceCatalogRequest, ServiceCatalogDto, UpdateServiceCatalogRequest};
use crate::interfaces::http::common::{
    error_response, ok, ApiError, ApiResponse, ApiResult, PaginatedResponse, PaginationParams,
    ValidatedJson,
};
use crate::interfaces::http::middleware::{require_roles, roles};
use crate::interfaces::http::router::AppState;

pub fn routes() -> Router<AppState> {
    let staff = Router::new()
        .route("/service-catalog", get(list_services))
        .route("/service-catalog/active", get(list_active_services))
        .route("/service-catalog/{id}", get(get_service));

    let admin = Router::new()
        .route("/service-catalog", post(create_service))
        .route("/service-catalog/{id}", put(update_service).delete(delete_service))
        .route_layer(middleware::from_fn_with_state(roles::ADMIN, require_roles));

    staff.merge(admin)
}

#[utoipa::path(
    get,
    path = "/api/v1/service-catalog",
    tag = "Service Catalog",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses((status = 200, description = "Catalog entries", body = ApiResponse<PaginatedResponse<ServiceCatalogDto>>))
)]
pub async fn list_services(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<PaginatedResponse<ServiceCatalogDto>> {
    let result = state
        .service_catalog
        .list(params.into())
        .await
        .map_err(error_response)?;
    ok(PaginatedResponse::from_result(result, ServiceCatalogDto::from))
}

#[utoipa::path(
    get,
    path = "/api/v1/service-catalog/active",
    tag = "Service Catalog",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Active catalog entries", body = ApiResponse<Vec<ServiceCatalogDto>>))
)]
pub async fn list_active_services(
    State(state): State<AppState>,
) -> ApiResult<Vec<ServiceCatalogDto>> {
    let entries = state
        .service_catalog
        .list_active()
        .await
        .map_err(error_response)?;
    ok(entries.into_iter().map(ServiceCatalogDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/service-catalog/{id}",
    tag = "Service Catalog",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Catalog entry ID")),
    responses(
        (status = 200, description = "Catalog entry", body = ApiResponse<ServiceCatalogDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<ServiceCatalogDto> {
    let entry = state.service_catalog.get(id).await.map_err(error_response)?;
    ok(entry.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/service-catalog",
    tag = "Service Catalog",
    security(("bearer_auth" = [])),
    request_body = CreateServiceCatalogRequest,
    responses(
        (status = 201, description = "Catalog entry created", body = ApiResponse<ServiceCatalogDto>),
        (status = 409, description = "Name already exists")
    )
)]
pub async fn create_service(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateServiceCatalogRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ServiceCatalogDto>>), ApiError> {
    let entry = state
        .service_catalog
        .create(req.into())
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(entry.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/service-catalog/{id}",
    tag = "Service Catalog",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Catalog entry ID")),
    request_body = UpdateServiceCatalogRequest,
    responses(
        (status = 200, description = "Catalog entry updated", body = ApiResponse<ServiceCatalogDto>),
        (status = 409, description = "Name already exists")
    )
)]
pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateServiceCatalogRequest>,
) -> ApiResult<ServiceCatalogDto> {
    let entry = state
        .service_catalog
        .update(id, req.into())
        .await
        .map_err(error_response)?;
    ok(entry.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/service-catalog/{id}",
    tag = "Service Catalog",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Catalog entry ID")),
    responses((status = 200, description = "Catalog entry deleted"))
)]
pub async fn delete_service(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<()> {
    state.service_catalog.delete(id).await.map_err(error_response)?;
    ok(())
}
