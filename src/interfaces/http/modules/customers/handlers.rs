//! Customer API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};

use super::dto::{CustomerDto, CustomerRequest, CustomerSearchParams};
use crate::interfaces::http::common::{
    error_response, ok, ApiError, ApiResponse, ApiResult, PaginatedResponse, PaginationParams,
    ValidatedJson,
};
use crate::interfaces::http::middleware::{require_roles, roles};
use crate::interfaces::http::router::AppState;
use crate::shared::PageRequest;

pub fn routes() -> Router<AppState> {
    let staff = Router::new()
        .route("/customers", get(list_customers))
        .route("/customers/search", get(search_customers))
        .route("/customers/{id}", get(get_customer));

    let front = Router::new()
        .route("/customers", post(create_customer))
        .route("/customers/{id}", put(update_customer))
        .route_layer(middleware::from_fn_with_state(roles::FRONT, require_roles));

    let admin = Router::new()
        .route("/customers/{id}", delete(delete_customer))
        .route_layer(middleware::from_fn_with_state(roles::ADMIN, require_roles));

    staff.merge(front).merge(admin)
}

#[utoipa::path(
    get,
    path = "/api/v1/customers",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses((status = 200, description = "Customer list", body = ApiResponse<PaginatedResponse<CustomerDto>>))
)]
pub async fn list_customers(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<PaginatedResponse<CustomerDto>> {
    let result = state
        .customers
        .list(params.into())
        .await
        .map_err(error_response)?;
    ok(PaginatedResponse::from_result(result, CustomerDto::from))
}

#[utoipa::path(
    get,
    path = "/api/v1/customers/search",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(CustomerSearchParams),
    responses((status = 200, description = "Matching customers", body = ApiResponse<PaginatedResponse<CustomerDto>>))
)]
pub async fn search_customers(
    State(state): State<AppState>,
    Query(params): Query<CustomerSearchParams>,
) -> ApiResult<PaginatedResponse<CustomerDto>> {
    let page = PageRequest::new(params.page, params.limit);
    let result = state
        .customers
        .search(&params.q, page)
        .await
        .map_err(error_response)?;
    ok(PaginatedResponse::from_result(result, CustomerDto::from))
}

#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer", body = ApiResponse<CustomerDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<CustomerDto> {
    let customer = state.customers.get(id).await.map_err(error_response)?;
    ok(customer.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/customers",
    tag = "Customers",
    security(("bearer_auth" = [])),
    request_body = CustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = ApiResponse<CustomerDto>),
        (status = 403, description = "Front desk only")
    )
)]
pub async fn create_customer(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CustomerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CustomerDto>>), ApiError> {
    let customer = state
        .customers
        .create(req.into())
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(customer.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/customers/{id}",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Customer ID")),
    request_body = CustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = ApiResponse<CustomerDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<CustomerRequest>,
) -> ApiResult<CustomerDto> {
    let customer = state
        .customers
        .update(id, req.into())
        .await
        .map_err(error_response)?;
    ok(customer.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/customers/{id}",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_customer(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<()> {
    state.customers.delete(id).await.map_err(error_response)?;
    ok(())
}
