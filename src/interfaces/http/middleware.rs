//! Authentication and role middleware for Axum

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use crate::domain::UserRole;
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig, TokenClaims};
use crate::interfaces::http::common::ApiResponse;

/// Authentication error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    InsufficientPermissions,
}

/// Authentication state containing the JWT config
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Staff member resolved from the bearer token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    fn from_claims(claims: TokenClaims) -> Option<Self> {
        let role = claims.role.parse().ok()?;
        Some(Self {
            user_id: claims.sub,
            email: claims.email,
            role,
        })
    }

    pub fn has_any_role(&self, roles: &[UserRole]) -> bool {
        roles.contains(&self.role)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AuthenticatedUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| auth_error_response(AuthError::MissingToken))
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// JWT authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(auth_header) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    let user = match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => AuthenticatedUser::from_claims(claims),
        Err(e) => {
            debug!(error = %e, "Rejected bearer token");
            None
        }
    };
    let Some(user) = user else {
        return auth_error_response(AuthError::InvalidToken);
    };

    request.extensions_mut().insert(user);
    next.run(request).await
}

/// Roles allowed through [`require_roles`]
#[derive(Clone, Copy, Debug)]
pub struct RequiredRoles(pub &'static [UserRole]);

pub mod roles {
    use super::RequiredRoles;
    use crate::domain::UserRole;

    pub const ADMIN: RequiredRoles = RequiredRoles(&[UserRole::Admin]);
    /// Front desk: admins and receptionists
    pub const FRONT: RequiredRoles = RequiredRoles(&[UserRole::Admin, UserRole::Receptionist]);
}

/// Rejects with 403 unless the authenticated user holds one of the roles.
/// Must run inside [`auth_middleware`].
pub async fn require_roles(
    State(required): State<RequiredRoles>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let allowed = request
        .extensions()
        .get::<AuthenticatedUser>()
        .map(|user| user.has_any_role(required.0));

    match allowed {
        Some(true) => next.run(request).await,
        Some(false) => auth_error_response(AuthError::InsufficientPermissions),
        None => auth_error_response(AuthError::MissingToken),
    }
}

fn auth_error_response(error: AuthError) -> Response {
    let (status, message) = match error {
        AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authentication token"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid authentication token"),
        AuthError::InsufficientPermissions => (StatusCode::FORBIDDEN, "Insufficient permissions"),
    };

    (status, Json(ApiResponse::<()>::error(message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Router};
    use tower::Service;

    use crate::infrastructure::crypto::jwt::create_token;

    async fn whoami(user: AuthenticatedUser) -> String {
        user.role.to_string()
    }

    fn app(config: JwtConfig) -> Router {
        let admin_only = Router::new()
            .route("/admin", get(whoami))
            .route_layer(middleware::from_fn_with_state(roles::ADMIN, require_roles));

        Router::new()
            .route("/me", get(whoami))
            .merge(admin_only)
            .layer(middleware::from_fn_with_state(
                AuthState { jwt_config: config },
                auth_middleware,
            ))
    }

    async fn status(config: &JwtConfig, uri: &str, token: Option<String>) -> StatusCode {
        let mut req = Request::builder().uri(uri);
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let mut svc = app(config.clone()).into_service();
        svc.call(req.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn missing_or_garbage_token_is_401() {
        let config = JwtConfig::default();
        assert_eq!(status(&config, "/me", None).await, StatusCode::UNAUTHORIZED);
        assert_eq!(
            status(&config, "/me", Some("not.a.jwt".into())).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn role_check_runs_after_authentication() {
        let config = JwtConfig::default();
        let tech = create_token("u1", "t@shop.vn", "TECHNICIAN", &config).unwrap();
        let admin = create_token("u2", "a@shop.vn", "ADMIN", &config).unwrap();

        assert_eq!(status(&config, "/me", Some(tech.clone())).await, StatusCode::OK);
        assert_eq!(status(&config, "/admin", Some(tech)).await, StatusCode::FORBIDDEN);
        assert_eq!(status(&config, "/admin", Some(admin)).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_rejected() {
        let config = JwtConfig::default();
        let other = JwtConfig {
            secret: "another-secret".into(),
            ..JwtConfig::default()
        };
        let token = create_token("u1", "t@shop.vn", "ADMIN", &other).unwrap();
        assert_eq!(status(&config, "/me", Some(token)).await, StatusCode::UNAUTHORIZED);
    }
}
