//! Auth API handlers

use axum::{extract::State, routing::get, Router};

use super::dto::{LoginRequest, LoginResponse};
use crate::interfaces::http::common::{error_response, ok, ApiResponse, ApiResult, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::users::UserDto;
use crate::interfaces::http::router::AppState;

/// Routes behind the auth middleware
pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(get_current_user))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let result = state
        .users
        .login(&req.email, &req.password)
        .await
        .map_err(error_response)?;
    ok(result.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserDto>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<UserDto> {
    let user = state
        .users
        .get_user(&user.user_id)
        .await
        .map_err(error_response)?;
    ok(user.into())
}
