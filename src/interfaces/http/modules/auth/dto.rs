//! Auth DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::AuthResult;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub user_id: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

impl From<AuthResult> for LoginResponse {
    fn from(r: AuthResult) -> Self {
        Self {
            token: r.token,
            token_type: r.token_type,
            expires_in: r.expires_in,
            user_id: r.user.id,
            email: r.user.email,
            full_name: r.user.full_name,
            role: r.user.role.to_string(),
        }
    }
}
