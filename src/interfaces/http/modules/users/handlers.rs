//! User management API handlers
//!
//! Admin-only CRUD endpoints. Delegates to `UserService`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, patch},
    Json, Router,
};

use super::dto::{CreateUserRequest, UpdateUserRequest, UserDto};
use crate::application::{CreateUser, UpdateUser};
use crate::domain::UserRole;
use crate::interfaces::http::common::{
    error_response, ok, ApiError, ApiResponse, ApiResult, PaginatedResponse, PaginationParams,
    ValidatedJson,
};
use crate::interfaces::http::middleware::{require_roles, roles};
use crate::interfaces::http::router::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/users/{id}/activate", patch(activate_user))
        .route("/users/{id}/deactivate", patch(deactivate_user))
        .route_layer(middleware::from_fn_with_state(roles::ADMIN, require_roles))
}

fn parse_role(role: Option<String>) -> Result<Option<UserRole>, ApiError> {
    role.map(|r| r.parse::<UserRole>())
        .transpose()
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses(
        (status = 200, description = "User list", body = ApiResponse<PaginatedResponse<UserDto>>),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<PaginatedResponse<UserDto>> {
    let result = state
        .users
        .list_users(params.into())
        .await
        .map_err(error_response)?;
    ok(PaginatedResponse::from_result(result, UserDto::from))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<UserDto> {
    let user = state.users.get_user(&id).await.map_err(error_response)?;
    ok(user.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserDto>),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), ApiError> {
    let cmd = CreateUser {
        full_name: req.full_name,
        email: req.email,
        password: req.password,
        phone: req.phone,
        role: parse_role(req.role)?,
    };
    let user = state.users.create_user(cmd).await.map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(user.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<UserDto> {
    let cmd = UpdateUser {
        full_name: req.full_name,
        email: req.email,
        password: req.password,
        phone: req.phone,
        role: parse_role(req.role)?,
    };
    let user = state
        .users
        .update_user(&id, cmd)
        .await
        .map_err(error_response)?;
    ok(user.into())
}

#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}/activate",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses((status = 200, description = "User activated", body = ApiResponse<UserDto>))
)]
pub async fn activate_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<UserDto> {
    let user = state
        .users
        .set_active(&id, true)
        .await
        .map_err(error_response)?;
    ok(user.into())
}

#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}/deactivate",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses((status = 200, description = "User deactivated", body = ApiResponse<UserDto>))
)]
pub async fn deactivate_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<UserDto> {
    let user = state
        .users
        .set_active(&id, false)
        .await
        .map_err(error_response)?;
    ok(user.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.users.delete_user(&id).await.map_err(error_response)?;
    ok(())
}
