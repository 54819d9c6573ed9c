//! Customer DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::services::CustomerInput;
use crate::domain::Customer;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Customer> for CustomerDto {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            name: c.name,
            phone: c.phone,
            email: c.email,
            address: c.address,
            note: c.note,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Create or full update
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 20))]
    pub phone: String,
    #[validate(email)]
    pub email: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
}

impl From<CustomerRequest> for CustomerInput {
    fn from(r: CustomerRequest) -> Self {
        Self {
            name: r.name,
            phone: r.phone,
            email: r.email,
            address: r.address,
            note: r.note,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CustomerSearchParams {
    /// Matches name, phone or email
    pub q: String,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}
