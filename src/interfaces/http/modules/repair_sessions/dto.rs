//! Repair session DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::RepairSession;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepairSessionDto {
    pub id: i32,
    pub device_id: i32,
    pub status: String,
    pub received_date: DateTime<Utc>,
    pub expected_return_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub assigned_to: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RepairSession> for RepairSessionDto {
    fn from(s: RepairSession) -> Self {
        Self {
            id: s.id,
            device_id: s.device_id,
            status: s.status.to_string(),
            received_date: s.received_date,
            expected_return_date: s.expected_return_date,
            note: s.note,
            assigned_to: s.assigned_to,
            created_by: s.created_by,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRepairSessionRequest {
    pub device_id: i32,
    /// Default: RECEIVED
    pub status: Option<String>,
    /// Default: now
    pub received_date: Option<DateTime<Utc>>,
    pub expected_return_date: Option<DateTime<Utc>>,
    #[validate(length(max = 1000))]
    pub note: Option<String>,
    pub assigned_to: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRepairSessionRequest {
    pub status: Option<String>,
    pub received_date: Option<DateTime<Utc>>,
    pub expected_return_date: Option<DateTime<Utc>>,
    #[validate(length(max = 1000))]
    pub note: Option<String>,
    pub assigned_to: Option<String>,
}
