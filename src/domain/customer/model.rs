use chrono::{DateTime, Utc};

/// A person who brings devices in for repair
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.into(),
            phone: phone.into(),
            email: None,
            address: None,
            note: None,
            created_at: now,
            updated_at: now,
        }
    }
}
