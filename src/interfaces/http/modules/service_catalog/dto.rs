//! Service catalog DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::services::{ServiceCatalogInput, ServiceCatalogUpdate};
use crate::domain::ServiceCatalog;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCatalogDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub base_cost: i64,
    pub default_part_used: Option<String>,
    pub default_warranty_months: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ServiceCatalog> for ServiceCatalogDto {
    fn from(c: ServiceCatalog) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            base_cost: c.base_cost,
            default_part_used: c.default_part_used,
            default_warranty_months: c.default_warranty_months,
            is_active: c.is_active,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceCatalogRequest {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub base_cost: i64,
    pub default_part_used: Option<String>,
    #[validate(range(min = 0))]
    pub default_warranty_months: Option<i32>,
    pub is_active: Option<bool>,
}

impl From<CreateServiceCatalogRequest> for ServiceCatalogInput {
    fn from(r: CreateServiceCatalogRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            base_cost: r.base_cost,
            default_part_used: r.default_part_used,
            default_warranty_months: r.default_warranty_months,
            is_active: r.is_active,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceCatalogRequest {
    #[validate(length(min = 1, max = 150))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub base_cost: Option<i64>,
    pub default_part_used: Option<String>,
    #[validate(range(min = 0))]
    pub default_warranty_months: Option<i32>,
    pub is_active: Option<bool>,
}

impl From<UpdateServiceCatalogRequest> for ServiceCatalogUpdate {
    fn from(r: UpdateServiceCatalogRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            base_cost: r.base_cost,
            default_part_used: r.default_part_used,
            default_warranty_months: r.default_warranty_months,
            is_active: r.is_active,
        }
    }
}
