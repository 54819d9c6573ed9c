use chrono::{DateTime, Utc};

/// A concrete model sold under a brand, e.g. "iPhone 13" under "Apple".
///
/// `(brand_id, name)` is unique.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceModel {
    pub id: i32,
    pub brand_id: i32,
    pub name: String,
    /// Free-form category such as `PHONE`, `LAPTOP`, `TABLET`
    pub device_type: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DeviceModel {
    pub fn new(brand_id: i32, name: impl Into<String>, device_type: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            brand_id,
            name: name.into(),
            device_type: device_type.into(),
            description: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
