//! Uploaded file metadata

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::domain::DomainError;

/// Content types accepted for upload
pub const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Image,
    Document,
    Other,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "IMAGE",
            Self::Document => "DOCUMENT",
            Self::Other => "OTHER",
        }
    }

    pub fn from_content_type(content_type: &str) -> Self {
        if content_type.starts_with("image/") {
            Self::Image
        } else if content_type.starts_with("application/") {
            Self::Document
        } else {
            Self::Other
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IMAGE" => Ok(Self::Image),
            "DOCUMENT" => Ok(Self::Document),
            "OTHER" => Ok(Self::Other),
            other => Err(DomainError::Validation(format!("Unknown media type: {}", other))),
        }
    }
}

/// Kind of record a file is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Device,
    Customer,
    RepairSession,
    RepairItem,
    Warranty,
    Transaction,
    User,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Device => "DEVICE",
            Self::Customer => "CUSTOMER",
            Self::RepairSession => "REPAIR_SESSION",
            Self::RepairItem => "REPAIR_ITEM",
            Self::Warranty => "WARRANTY",
            Self::Transaction => "TRANSACTION",
            Self::User => "USER",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEVICE" => Ok(Self::Device),
            "CUSTOMER" => Ok(Self::Customer),
            "REPAIR_SESSION" => Ok(Self::RepairSession),
            "REPAIR_ITEM" => Ok(Self::RepairItem),
            "WARRANTY" => Ok(Self::Warranty),
            "TRANSACTION" => Ok(Self::Transaction),
            "USER" => Ok(Self::User),
            other => Err(DomainError::Validation(format!("Unknown entity type: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Media {
    pub id: i32,
    pub original_filename: String,
    /// `{uuid}{.ext}`, unique
    pub stored_filename: String,
    /// Key inside the file storage backend
    pub storage_key: String,
    pub file_size: i64,
    pub content_type: String,
    pub media_type: MediaType,
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<String>,
    pub uploaded_by: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Media {
    /// Extension of the original filename including the dot, or empty.
    /// Only ASCII alphanumeric extensions are kept.
    pub fn extension_of(filename: &str) -> &str {
        match filename.rfind('.') {
            Some(idx)
                if idx > 0
                    && idx + 1 < filename.len()
                    && filename[idx + 1..].bytes().all(|b| b.is_ascii_alphanumeric()) =>
            {
                &filename[idx..]
            }
            _ => "",
        }
    }

    /// Storage key for a stored filename: `{ENTITY_TYPE}/{entityId}/{file}`
    /// when attached to a record, otherwise `general/{file}`.
    pub fn storage_key_for(
        entity_type: Option<EntityType>,
        entity_id: Option<&str>,
        stored_filename: &str,
    ) -> String {
        match (entity_type, entity_id) {
            (Some(t), Some(id)) => format!("{}/{}/{}", t.as_str(), id, stored_filename),
            (Some(t), None) => format!("{}/{}", t.as_str(), stored_filename),
            _ => format!("general/{}", stored_filename),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_keeps_the_dot() {
        assert_eq!(Media::extension_of("photo.front.JPG"), ".JPG");
        assert_eq!(Media::extension_of("README"), "");
        assert_eq!(Media::extension_of(".hidden"), "");
        assert_eq!(Media::extension_of("a.png/x"), "");
        assert_eq!(Media::extension_of("scan."), "");
        assert_eq!(Media::extension_of("evil.p\\ng"), "");
    }

    #[test]
    fn storage_key_layout() {
        assert_eq!(
            Media::storage_key_for(Some(EntityType::Device), Some("12"), "a.png"),
            "DEVICE/12/a.png"
        );
        assert_eq!(Media::storage_key_for(None, None, "a.png"), "general/a.png");
    }

    #[test]
    fn media_type_from_content_type() {
        assert_eq!(MediaType::from_content_type("image/png"), MediaType::Image);
        assert_eq!(MediaType::from_content_type("application/pdf"), MediaType::Document);
        assert_eq!(MediaType::from_content_type("text/plain"), MediaType::Other);
    }
}
