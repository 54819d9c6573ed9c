//! Storage trait definitions

use async_trait::async_trait;

use crate::domain::DomainResult;

/// Bytes and content type read back from storage
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Key/value blob store. Keys are `/`-separated relative paths such as
/// `device/42/3f2a....jpg`.
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> DomainResult<()>;
    async fn get(&self, key: &str) -> DomainResult<StoredObject>;
    async fn delete(&self, key: &str) -> DomainResult<()>;
    /// Public URL for a key. Does not check that the object exists.
    fn url_for(&self, key: &str) -> String;
}

/// Rejects keys that could escape the storage root.
pub(super) fn validate_key(key: &str) -> DomainResult<()> {
    use crate::domain::DomainError;

    if key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key.split('/').any(|part| part.is_empty() || part == "." || part == "..")
    {
        return Err(DomainError::Validation(format!("Invalid storage key: {}", key)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_nested_relative_keys() {
        assert!(validate_key("device/42/abc.jpg").is_ok());
        assert!(validate_key("general/abc").is_ok());
    }

    #[test]
    fn rejects_traversal_and_absolute_keys() {
        for key in ["", "/etc/passwd", "../x", "a/../../b", "a//b", "a\\b", "./a"] {
            assert!(validate_key(key).is_err(), "{key} should be rejected");
        }
    }
}
