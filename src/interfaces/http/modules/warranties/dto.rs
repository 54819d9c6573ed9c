//! Warranty DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::services::{CreateWarranty, UpdateWarranty};
use crate::domain::Warranty;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WarrantyDto {
    pub id: i32,
    pub device_id: i32,
    pub repair_session_id: i32,
    pub repair_item_id: Option<i32>,
    pub warranty_months: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub warranty_code: String,
    /// End date already passed at response time
    pub expired: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Warranty> for WarrantyDto {
    fn from(w: Warranty) -> Self {
        let expired = w.is_expired_at(Utc::now());
        Self {
            id: w.id,
            device_id: w.device_id,
            repair_session_id: w.repair_session_id,
            repair_item_id: w.repair_item_id,
            warranty_months: w.warranty_months,
            start_date: w.start_date,
            end_date: w.end_date,
            warranty_code: w.warranty_code,
            expired,
            created_at: w.created_at,
            updated_at: w.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWarrantyRequest {
    pub device_id: i32,
    /// Defaults to the latest session of the device
    pub repair_session_id: Option<i32>,
    /// Omit to cover the whole device
    pub repair_item_id: Option<i32>,
    #[validate(range(min = 1, max = 120))]
    pub warranty_months: i32,
}

impl From<CreateWarrantyRequest> for CreateWarranty {
    fn from(r: CreateWarrantyRequest) -> Self {
        Self {
            device_id: r.device_id,
            repair_session_id: r.repair_session_id,
            repair_item_id: r.repair_item_id,
            warranty_months: r.warranty_months,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWarrantyRequest {
    #[validate(range(min = 1, max = 120))]
    pub warranty_months: Option<i32>,
    pub repair_item_id: Option<i32>,
}

impl From<UpdateWarrantyRequest> for UpdateWarranty {
    fn from(r: UpdateWarrantyRequest) -> Self {
        Self {
            warranty_months: r.warranty_months,
            repair_item_id: r.repair_item_id,
        }
    }
}
