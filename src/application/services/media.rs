//! Uploaded attachments: metadata rows plus bytes in a [`FileStorage`]

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::{clean, require_user};
use crate::domain::media::ALLOWED_CONTENT_TYPES;
use crate::domain::{DomainError, DomainResult, EntityType, Media, MediaType, RepositoryProvider};
use crate::infrastructure::storage::{FileStorage, StoredObject};
use crate::shared::{PageRequest, PaginatedResult};

#[derive(Debug, Clone, Default)]
pub struct UploadMedia {
    pub original_filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    /// Derived from the content type when absent
    pub media_type: Option<MediaType>,
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<String>,
    pub description: Option<String>,
}

/// File contents ready to stream back to a client
#[derive(Debug, Clone)]
pub struct MediaDownload {
    pub media: Media,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

pub struct MediaService {
    repos: Arc<dyn RepositoryProvider>,
    storage: Arc<dyn FileStorage>,
    max_file_size: u64,
}

impl MediaService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        storage: Arc<dyn FileStorage>,
        max_file_size: u64,
    ) -> Self {
        Self {
            repos,
            storage,
            max_file_size,
        }
    }

    pub async fn upload(&self, actor_id: &str, upload: UploadMedia) -> DomainResult<Media> {
        require_user(self.repos.as_ref(), actor_id).await?;

        if upload.bytes.is_empty() {
            return Err(DomainError::Validation("File is empty".into()));
        }
        if upload.bytes.len() as u64 > self.max_file_size {
            return Err(DomainError::Validation(format!(
                "File exceeds the maximum size of {} bytes",
                self.max_file_size
            )));
        }
        let content_type = upload.content_type.trim().to_ascii_lowercase();
        if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
            return Err(DomainError::Validation(format!(
                "Unsupported content type: {}",
                content_type
            )));
        }

        let original_filename = match upload.original_filename.trim() {
            "" => "file".to_string(),
            name => name.to_string(),
        };
        let stored_filename = format!(
            "{}{}",
            uuid::Uuid::new_v4(),
            Media::extension_of(&original_filename)
        );
        let entity_id = clean(upload.entity_id);
        let storage_key =
            Media::storage_key_for(upload.entity_type, entity_id.as_deref(), &stored_filename);
        let file_size = upload.bytes.len() as i64;

        self.storage
            .put(&storage_key, upload.bytes, &content_type)
            .await?;

        let now = Utc::now();
        let media = Media {
            id: 0,
            original_filename,
            stored_filename,
            storage_key: storage_key.clone(),
            file_size,
            media_type: upload
                .media_type
                .unwrap_or_else(|| MediaType::from_content_type(&content_type)),
            content_type,
            entity_type: upload.entity_type,
            entity_id,
            uploaded_by: actor_id.to_string(),
            description: clean(upload.description),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let media = match self.repos.media().save(media).await {
            Ok(media) => media,
            Err(e) => {
                // row failed, so the stored bytes are unreachable
                if let Err(cleanup) = self.storage.delete(&storage_key).await {
                    warn!(key = %storage_key, error = %cleanup, "Failed to remove orphaned upload");
                }
                return Err(e);
            }
        };

        info!(
            media_id = media.id,
            key = %media.storage_key,
            size = media.file_size,
            uploaded_by = %actor_id,
            "Media uploaded"
        );
        Ok(media)
    }

    pub async fn download(&self, id: i32) -> DomainResult<MediaDownload> {
        let media = self.get(id).await?;
        if !media.is_active {
            return Err(DomainError::InvalidState(format!(
                "Media {} has been deleted",
                id
            )));
        }
        let object = self.storage.get(&media.storage_key).await?;
        Ok(MediaDownload {
            content_type: media.content_type.clone(),
            bytes: object.bytes,
            media,
        })
    }

    /// Raw object behind a public URL
    pub async fn fetch_object(&self, key: &str) -> DomainResult<StoredObject> {
        self.storage.get(key).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Media> {
        self.repos
            .media()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Media", "id", id))
    }

    pub fn url_for(&self, media: &Media) -> String {
        self.storage.url_for(&media.storage_key)
    }

    pub async fn list_by_entity(
        &self,
        entity_type: EntityType,
        entity_id: &str,
        media_type: Option<MediaType>,
    ) -> DomainResult<Vec<Media>> {
        self.repos
            .media()
            .find_by_entity(entity_type, entity_id.trim(), media_type)
            .await
    }

    pub async fn my_uploads(
        &self,
        actor_id: &str,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<Media>> {
        self.repos.media().find_by_uploader(actor_id, page).await
    }

    pub async fn list_active(&self, page: PageRequest) -> DomainResult<PaginatedResult<Media>> {
        self.repos.media().find_active(page).await
    }

    /// Deactivates the row, then removes the stored bytes.
    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        let media = self.get(id).await?;
        self.repos.media().deactivate(id).await?;
        if let Err(e) = self.storage.delete(&media.storage_key).await {
            warn!(media_id = id, key = %media.storage_key, error = %e, "Stored object not removed");
        }
        info!(media_id = id, "Media deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{User, UserRole};
    use crate::infrastructure::database::test_support::{memory_repos, seed_user};
    use crate::infrastructure::storage::InMemoryFileStorage;

    async fn setup(max: u64) -> (MediaService, Arc<InMemoryFileStorage>, User) {
        let repos = memory_repos().await;
        let user = seed_user(repos.as_ref(), "t@shop.vn", UserRole::Technician).await;
        let storage = Arc::new(InMemoryFileStorage::default());
        let svc = MediaService::new(repos, storage.clone(), max);
        (svc, storage, user)
    }

    fn png(entity: Option<(EntityType, &str)>) -> UploadMedia {
        UploadMedia {
            original_filename: "front.png".into(),
            content_type: "image/png".into(),
            bytes: b"\x89PNG....".to_vec(),
            entity_type: entity.map(|(t, _)| t),
            entity_id: entity.map(|(_, id)| id.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn upload_stores_under_entity_key() {
        let (svc, storage, user) = setup(1024).await;

        let media = svc
            .upload(&user.id, png(Some((EntityType::Device, "12"))))
            .await
            .unwrap();
        assert!(media.storage_key.starts_with("DEVICE/12/"));
        assert!(media.stored_filename.ends_with(".png"));
        assert_eq!(media.media_type, MediaType::Image);
        assert_eq!(media.uploaded_by, user.id);
        assert!(storage.contains(&media.storage_key));

        let general = svc.upload(&user.id, png(None)).await.unwrap();
        assert!(general.storage_key.starts_with("general/"));
    }

    #[tokio::test]
    async fn slash_in_filename_does_not_nest_the_key() {
        let (svc, _, user) = setup(1024).await;
        let mut upload = png(None);
        upload.original_filename = "a.png/x".into();

        let media = svc.upload(&user.id, upload).await.unwrap();
        assert!(!media.stored_filename.contains('/'));
        assert_eq!(media.storage_key, format!("general/{}", media.stored_filename));
    }

    #[tokio::test]
    async fn rejects_empty_oversized_and_unsupported_files() {
        let (svc, storage, user) = setup(4).await;

        let mut empty = png(None);
        empty.bytes.clear();
        assert!(matches!(svc.upload(&user.id, empty).await, Err(DomainError::Validation(_))));

        assert!(matches!(
            svc.upload(&user.id, png(None)).await,
            Err(DomainError::Validation(_))
        ));

        let mut exe = png(None);
        exe.bytes = b"MZ".to_vec();
        exe.content_type = "application/x-msdownload".into();
        assert!(matches!(svc.upload(&user.id, exe).await, Err(DomainError::Validation(_))));

        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn delete_deactivates_and_blocks_download() {
        let (svc, storage, user) = setup(1024).await;
        let media = svc.upload(&user.id, png(None)).await.unwrap();

        let download = svc.download(media.id).await.unwrap();
        assert_eq!(download.content_type, "image/png");
        assert_eq!(download.bytes, b"\x89PNG....".to_vec());

        svc.delete(media.id).await.unwrap();
        assert!(!storage.contains(&media.storage_key));
        assert!(!svc.get(media.id).await.unwrap().is_active);
        assert!(matches!(
            svc.download(media.id).await,
            Err(DomainError::InvalidState(_))
        ));
        assert_eq!(svc.list_active(PageRequest::default()).await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn list_by_entity_and_my_uploads() {
        let (svc, _, user) = setup(1024).await;
        svc.upload(&user.id, png(Some((EntityType::Customer, "3"))))
            .await
            .unwrap();
        svc.upload(&user.id, png(None)).await.unwrap();

        let attached = svc
            .list_by_entity(EntityType::Customer, "3", None)
            .await
            .unwrap();
        assert_eq!(attached.len(), 1);
        let mine = svc
            .my_uploads(&user.id, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(mine.total, 2);
        assert!(svc.url_for(&attached[0]).ends_with(&attached[0].storage_key));
    }
}
