//! Staff account entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::domain::DomainError;

/// Staff role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserRole {
    Admin,
    Technician,
    Receptionist,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Technician => "TECHNICIAN",
            UserRole::Receptionist => "RECEPTIONIST",
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Technician
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(UserRole::Admin),
            "TECHNICIAN" => Ok(UserRole::Technician),
            "RECEPTIONIST" => Ok(UserRole::Receptionist),
            other => Err(DomainError::Validation(format!("Unknown role: {}", other))),
        }
    }
}

/// Staff member able to log in
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub full_name: String,
    /// Login identifier, unique
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        role: UserRole,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            full_name: full_name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            phone: None,
            role,
            is_active: true,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!(" Receptionist ".parse::<UserRole>().unwrap(), UserRole::Receptionist);
        assert!("manager".parse::<UserRole>().is_err());
    }

    #[test]
    fn new_user_is_active_with_fresh_id() {
        let a = User::new("A", "a@shop.test", "hash", UserRole::Technician);
        let b = User::new("B", "b@shop.test", "hash", UserRole::Technician);
        assert!(a.is_active);
        assert_ne!(a.id, b.id);
    }
}
