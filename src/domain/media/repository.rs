use async_trait::async_trait;

use super::model::{EntityType, Media, MediaType};
use crate::domain::DomainResult;
use crate::shared::{PageRequest, PaginatedResult};

#[async_trait]
pub trait MediaRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Media>>;
    /// Active media attached to one record, newest first
    async fn find_by_entity(
        &self,
        entity_type: EntityType,
        entity_id: &str,
        media_type: Option<MediaType>,
    ) -> DomainResult<Vec<Media>>;
    async fn find_by_uploader(
        &self,
        user_id: &str,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<Media>>;
    async fn find_active(&self, page: PageRequest) -> DomainResult<PaginatedResult<Media>>;
    async fn save(&self, media: Media) -> DomainResult<Media>;
    async fn deactivate(&self, id: i32) -> DomainResult<()>;
}
