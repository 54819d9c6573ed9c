//! Repair item DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::services::RepairItemInput;
use crate::domain::RepairItem;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepairItemDto {
    pub id: i32,
    pub device_id: i32,
    pub repair_session_id: Option<i32>,
    pub service_catalog_id: Option<i32>,
    pub service_name: String,
    pub part_used: Option<String>,
    pub cost: Option<i64>,
    pub warranty_months: Option<i32>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RepairItem> for RepairItemDto {
    fn from(i: RepairItem) -> Self {
        Self {
            id: i.id,
            device_id: i.device_id,
            repair_session_id: i.repair_session_id,
            service_catalog_id: i.service_catalog_id,
            service_name: i.service_name,
            part_used: i.part_used,
            cost: i.cost,
            warranty_months: i.warranty_months,
            description: i.description,
            created_at: i.created_at,
            updated_at: i.updated_at,
        }
    }
}

/// Blank fields are filled from the catalog entry when one is given
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRepairItemRequest {
    pub device_id: i32,
    pub repair_session_id: Option<i32>,
    pub service_catalog_id: Option<i32>,
    #[validate(length(max = 150))]
    pub service_name: Option<String>,
    pub part_used: Option<String>,
    #[validate(range(min = 0))]
    pub cost: Option<i64>,
    #[validate(range(min = 0))]
    pub warranty_months: Option<i32>,
    pub description: Option<String>,
}

impl From<CreateRepairItemRequest> for RepairItemInput {
    fn from(r: CreateRepairItemRequest) -> Self {
        Self {
            device_id: r.device_id,
            repair_session_id: r.repair_session_id,
            service_catalog_id: r.service_catalog_id,
            service_name: r.service_name,
            part_used: r.part_used,
            cost: r.cost,
            warranty_months: r.warranty_months,
            description: r.description,
        }
    }
}

/// Omitted fields keep their stored values
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRepairItemRequest {
    pub repair_session_id: Option<i32>,
    pub service_catalog_id: Option<i32>,
    #[validate(length(max = 150))]
    pub service_name: Option<String>,
    pub part_used: Option<String>,
    #[validate(range(min = 0))]
    pub cost: Option<i64>,
    #[validate(range(min = 0))]
    pub warranty_months: Option<i32>,
    pub description: Option<String>,
}

impl From<UpdateRepairItemRequest> for RepairItemInput {
    fn from(r: UpdateRepairItemRequest) -> Self {
        Self {
            device_id: 0,
            repair_session_id: r.repair_session_id,
            service_catalog_id: r.service_catalog_id,
            service_name: r.service_name,
            part_used: r.part_used,
            cost: r.cost,
            warranty_months: r.warranty_months,
            description: r.description,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotalCostDto {
    pub device_id: i32,
    pub total_cost: i64,
}
