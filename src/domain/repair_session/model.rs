use chrono::{DateTime, Utc};

use crate::domain::device::DeviceStatus;

/// Groups the repair items, payments and warranties of one visit
#[derive(Debug, Clone, PartialEq)]
pub struct RepairSession {
    pub id: i32,
    pub device_id: i32,
    pub status: DeviceStatus,
    pub received_date: DateTime<Utc>,
    pub expected_return_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub assigned_to: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RepairSession {
    pub fn new(device_id: i32, created_by: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            device_id,
            status: DeviceStatus::Received,
            received_date: now,
            expected_return_date: None,
            note: None,
            assigned_to: None,
            created_by: created_by.into(),
            created_at: now,
            updated_at: now,
        }
    }
}
