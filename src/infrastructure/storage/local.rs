//! Local filesystem storage backend

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::traits::{validate_key, FileStorage, StoredObject};
use crate::domain::{DomainError, DomainResult, MediaType};

/// Stores blobs under a root directory, one file per key.
///
/// Content types are not persisted; they are inferred from the file
/// extension on read, falling back to `application/octet-stream`.
pub struct LocalFileStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> DomainResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

fn io_err(e: std::io::Error) -> DomainError {
    DomainError::Storage(format!("File storage error: {}", e))
}

fn content_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string()
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> DomainResult<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(io_err)?;
        }
        fs::write(&path, &bytes).await.map_err(io_err)?;

        debug!(
            key,
            size = bytes.len(),
            content_type,
            media_type = %MediaType::from_content_type(content_type),
            "Stored object"
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> DomainResult<StoredObject> {
        let path = self.path_for(key)?;
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DomainError::not_found("File", "key", key));
            }
            Err(e) => return Err(io_err(e)),
        };

        Ok(StoredObject {
            bytes,
            content_type: content_type_for(&path),
        })
    }

    async fn delete(&self, key: &str) -> DomainResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(DomainError::not_found("File", "key", key))
            }
            Err(e) => Err(io_err(e)),
        }
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_storage() -> LocalFileStorage {
        let root = std::env::temp_dir().join(format!("fixsync-storage-{}", uuid::Uuid::new_v4()));
        LocalFileStorage::new(root, "/api/v1/media/files/")
    }

    #[tokio::test]
    async fn put_then_get_returns_bytes_and_inferred_type() {
        let storage = temp_storage();
        storage
            .put("device/1/photo.png", b"png-bytes".to_vec(), "image/png")
            .await
            .unwrap();

        let obj = storage.get("device/1/photo.png").await.unwrap();
        assert_eq!(obj.bytes, b"png-bytes");
        assert_eq!(obj.content_type, "image/png");

        let _ = std::fs::remove_dir_all(storage.root());
    }

    #[tokio::test]
    async fn delete_removes_object() {
        let storage = temp_storage();
        storage.put("general/a.pdf", vec![1, 2, 3], "application/pdf").await.unwrap();
        storage.delete("general/a.pdf").await.unwrap();

        let err = storage.get("general/a.pdf").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        let _ = std::fs::remove_dir_all(storage.root());
    }

    #[tokio::test]
    async fn traversal_keys_are_rejected() {
        let storage = temp_storage();
        let err = storage.put("../escape.txt", vec![0], "text/plain").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type_for(Path::new("general/a.JPG")), "image/jpeg");
        assert_eq!(
            content_type_for(Path::new("general/report.docx")),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(content_type_for(Path::new("general/notes.txt")), "text/plain");
        assert_eq!(
            content_type_for(Path::new("general/blob")),
            "application/octet-stream"
        );
    }

    #[test]
    fn url_joins_base_and_key() {
        let storage = temp_storage();
        assert_eq!(storage.url_for("general/x.jpg"), "/api/v1/media/files/general/x.jpg");
    }
}
