//! Response envelope, pagination and error mapping shared by all handlers

pub mod validated_json;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::DomainError;
use crate::shared::{PageRequest, PaginatedResult};

pub use validated_json::ValidatedJson;

/// Standard API response wrapper.
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "data": null, "error": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

/// `Json<ApiResponse<T>>` or a mapped [`DomainError`]
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

/// Map a domain error onto its HTTP status
pub fn error_response(err: DomainError) -> ApiError {
    let status = match &err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) | DomainError::InvalidState(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::Storage(msg) => {
            tracing::error!(error = %msg, "Storage failure while handling request");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ApiResponse::error(err.to_string())))
}

/// Pagination query parameters
#[derive(Debug, Clone, Copy, Deserialize, ToSchema, IntoParams)]
pub struct PaginationParams {
    /// Page number starting at 1. Default: 1
    pub page: Option<u32>,
    /// Items per page (1-100). Default: 20
    pub limit: Option<u32>,
}

impl From<PaginationParams> for PageRequest {
    fn from(p: PaginationParams) -> Self {
        PageRequest::new(p.page, p.limit)
    }
}

/// One page of results plus page metadata
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total: u64,
    /// Current page (1-based)
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn from_result<D>(result: PaginatedResult<D>, f: impl FnMut(D) -> T) -> Self {
        let result = result.map(f);
        Self {
            items: result.items,
            total: result.total,
            page: result.page,
            limit: result.limit,
            total_pages: result.total_pages,
        }
    }
}

/// Query string for endpoints that take a time window
#[derive(Debug, Deserialize, IntoParams)]
pub struct DateRangeParams {
    /// Inclusive lower bound (RFC 3339)
    pub start: chrono::DateTime<chrono::Utc>,
    /// Inclusive upper bound (RFC 3339)
    pub end: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_statuses() {
        let cases = [
            (DomainError::not_found("Device", "id", 1), StatusCode::NOT_FOUND),
            (DomainError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (DomainError::InvalidState("x".into()), StatusCode::BAD_REQUEST),
            (DomainError::Conflict("x".into()), StatusCode::CONFLICT),
            (DomainError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (DomainError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (DomainError::Storage("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(error_response(err).0, expected);
        }
    }

    #[test]
    fn pagination_params_are_clamped() {
        let page: PageRequest = PaginationParams {
            page: Some(0),
            limit: Some(1000),
        }
        .into();
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 100);
    }
}
