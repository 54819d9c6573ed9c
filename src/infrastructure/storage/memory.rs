//! In-memory storage implementation

use async_trait::async_trait;
use dashmap::DashMap;

use super::traits::{validate_key, FileStorage, StoredObject};
use crate::domain::{DomainError, DomainResult};

/// In-memory blob store for development and testing
pub struct InMemoryFileStorage {
    objects: DashMap<String, StoredObject>,
    public_base_url: String,
}

impl InMemoryFileStorage {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            objects: DashMap::new(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for InMemoryFileStorage {
    fn default() -> Self {
        Self::new("/api/v1/media/files")
    }
}

#[async_trait]
impl FileStorage for InMemoryFileStorage {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> DomainResult<()> {
        validate_key(key)?;
        self.objects.insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> DomainResult<StoredObject> {
        self.objects
            .get(key)
            .map(|o| o.value().clone())
            .ok_or_else(|| DomainError::not_found("File", "key", key))
    }

    async fn delete(&self, key: &str) -> DomainResult<()> {
        self.objects
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("File", "key", key))
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn keeps_content_type_from_put() {
        let storage = InMemoryFileStorage::default();
        storage.put("general/a.bin", vec![9], "application/pdf").await.unwrap();

        let obj = storage.get("general/a.bin").await.unwrap();
        assert_eq!(obj.content_type, "application/pdf");
        assert_eq!(storage.len(), 1);
    }

    #[tokio::test]
    async fn missing_key_is_not_found() {
        let storage = InMemoryFileStorage::default();
        assert!(matches!(
            storage.delete("nope").await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
