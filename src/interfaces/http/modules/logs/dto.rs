//! Audit log DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::RealtimeLog;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeLogDto {
    pub id: i32,
    pub device_id: i32,
    /// CREATED, UPDATED, STATUS_CHANGED or ASSIGNED
    pub action: String,
    pub detail: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl From<RealtimeLog> for RealtimeLogDto {
    fn from(l: RealtimeLog) -> Self {
        Self {
            id: l.id,
            device_id: l.device_id,
            action: l.action.to_string(),
            detail: l.detail,
            created_by: l.created_by,
            created_at: l.created_at,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct LogFilterParams {
    /// Only entries with this action
    pub action: Option<String>,
}
