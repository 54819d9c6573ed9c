use chrono::{DateTime, Utc};

/// Device manufacturer
#[derive(Debug, Clone, PartialEq)]
pub struct Brand {
    pub id: i32,
    /// Unique across all brands
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Brand {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.into(),
            description: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
