//! Device domain entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::domain::DomainError;

/// Device type used when the model does not carry one
pub const UNKNOWN_DEVICE_TYPE: &str = "UNKNOWN";

/// Where a device (or a repair session) is in the shop workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceStatus {
    Received,
    Inspecting,
    WaitingParts,
    Repairing,
    Completed,
    Returned,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "RECEIVED",
            Self::Inspecting => "INSPECTING",
            Self::WaitingParts => "WAITING_PARTS",
            Self::Repairing => "REPAIRING",
            Self::Completed => "COMPLETED",
            Self::Returned => "RETURNED",
        }
    }
}

impl Default for DeviceStatus {
    fn default() -> Self {
        Self::Received
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RECEIVED" => Ok(Self::Received),
            "INSPECTING" => Ok(Self::Inspecting),
            "WAITING_PARTS" => Ok(Self::WaitingParts),
            "REPAIRING" => Ok(Self::Repairing),
            "COMPLETED" => Ok(Self::Completed),
            "RETURNED" => Ok(Self::Returned),
            other => Err(DomainError::Validation(format!(
                "Unknown device status: {}",
                other
            ))),
        }
    }
}

/// One physical intake at the shop
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    pub id: i32,
    pub customer_id: Option<i32>,
    pub brand_id: i32,
    pub model_id: i32,
    /// Copied from the model at intake, never empty
    pub device_type: String,
    pub imei: Option<String>,
    pub color: Option<String>,
    pub status: DeviceStatus,
    pub received_date: DateTime<Utc>,
    pub expected_return_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
    /// Staff member who registered the intake
    pub created_by: String,
    pub assigned_to: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Device {
    pub fn new(brand_id: i32, model_id: i32, created_by: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            customer_id: None,
            brand_id,
            model_id,
            device_type: UNKNOWN_DEVICE_TYPE.to_string(),
            imei: None,
            color: None,
            status: DeviceStatus::Received,
            received_date: now,
            expected_return_date: None,
            note: None,
            created_by: created_by.into(),
            assigned_to: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Resolve the device type from the model's type, falling back to `UNKNOWN`.
    pub fn resolve_device_type(model_type: Option<&str>) -> String {
        model_type
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(UNKNOWN_DEVICE_TYPE)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            DeviceStatus::Received,
            DeviceStatus::WaitingParts,
            DeviceStatus::Returned,
        ] {
            assert_eq!(status.as_str().parse::<DeviceStatus>().unwrap(), status);
        }
        assert!("LOST".parse::<DeviceStatus>().is_err());
    }

    #[test]
    fn device_type_falls_back_to_unknown() {
        assert_eq!(Device::resolve_device_type(Some("PHONE")), "PHONE");
        assert_eq!(Device::resolve_device_type(Some("  ")), UNKNOWN_DEVICE_TYPE);
        assert_eq!(Device::resolve_device_type(None), UNKNOWN_DEVICE_TYPE);
    }

    #[test]
    fn new_device_starts_received() {
        let device = Device::new(1, 2, "user-1");
        assert_eq!(device.status, DeviceStatus::Received);
        assert_eq!(device.device_type, UNKNOWN_DEVICE_TYPE);
    }
}
