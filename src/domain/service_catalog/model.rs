use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCatalog {
    pub id: i32,
    /// Unique, compared case-insensitively
    pub name: String,
    pub description: Option<String>,
    /// Price in the smallest currency unit
    pub base_cost: i64,
    pub default_part_used: Option<String>,
    pub default_warranty_months: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceCatalog {
    pub fn new(name: impl Into<String>, base_cost: i64) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.into(),
            description: None,
            base_cost,
            default_part_used: None,
            default_warranty_months: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
