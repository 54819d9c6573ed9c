use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    Created,
    Updated,
    StatusChanged,
    Assigned,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Updated => "UPDATED",
            Self::StatusChanged => "STATUS_CHANGED",
            Self::Assigned => "ASSIGNED",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CREATED" => Ok(Self::Created),
            "UPDATED" => Ok(Self::Updated),
            "STATUS_CHANGED" => Ok(Self::StatusChanged),
            "ASSIGNED" => Ok(Self::Assigned),
            other => Err(DomainError::Validation(format!("Unknown action: {}", other))),
        }
    }
}

/// Stored audit event
#[derive(Debug, Clone, PartialEq)]
pub struct RealtimeLog {
    pub id: i32,
    pub device_id: i32,
    pub action: ActionType,
    pub detail: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Audit event waiting to be appended; the device id is supplied by the writer.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRealtimeLog {
    pub action: ActionType,
    pub detail: Option<String>,
    pub created_by: String,
}

impl NewRealtimeLog {
    pub fn new(action: ActionType, detail: impl Into<String>, created_by: impl Into<String>) -> Self {
        Self {
            action,
            detail: Some(detail.into()),
            created_by: created_by.into(),
        }
    }
}
