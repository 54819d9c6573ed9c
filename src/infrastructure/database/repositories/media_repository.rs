use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Select, Set,
};

use super::{db_err, write_err};
use crate::domain::media::MediaRepository;
use crate::domain::{DomainError, DomainResult, EntityType, Media, MediaType};
use crate::infrastructure::database::entities::media;
use crate::shared::{PageRequest, PaginatedResult};

pub struct SeaOrmMediaRepository {
    db: DatabaseConnection,
}

impl SeaOrmMediaRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch_page(
        &self,
        query: Select<media::Entity>,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<Media>> {
        let paginator = query
            .order_by_desc(media::Column::CreatedAt)
            .order_by_desc(media::Column::Id)
            .paginate(&self.db, page.limit as u64);

        let total = paginator.num_items().await.map_err(db_err)?;
        let models = paginator.fetch_page(page.index()).await.map_err(db_err)?;

        let items = models.into_iter().map(model_to_domain).collect();
        Ok(PaginatedResult::new(items, total, page.page, page.limit))
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn media_type_to_entity(t: MediaType) -> media::MediaType {
    match t {
        MediaType::Image => media::MediaType::Image,
        MediaType::Document => media::MediaType::Document,
        MediaType::Other => media::MediaType::Other,
    }
}

fn media_type_to_domain(t: media::MediaType) -> MediaType {
    match t {
        media::MediaType::Image => MediaType::Image,
        media::MediaType::Document => MediaType::Document,
        media::MediaType::Other => MediaType::Other,
    }
}

fn entity_type_to_entity(t: EntityType) -> media::EntityType {
    match t {
        EntityType::Device => media::EntityType::Device,
        EntityType::Customer => media::EntityType::Customer,
        EntityType::RepairSession => media::EntityType::RepairSession,
        EntityType::RepairItem => media::EntityType::RepairItem,
        EntityType::Warranty => media::EntityType::Warranty,
        EntityType::Transaction => media::EntityType::Transaction,
        EntityType::User => media::EntityType::User,
    }
}

fn entity_type_to_domain(t: media::EntityType) -> EntityType {
    match t {
        media::EntityType::Device => EntityType::Device,
        media::EntityType::Customer => EntityType::Customer,
        media::EntityType::RepairSession => EntityType::RepairSession,
        media::EntityType::RepairItem => EntityType::RepairItem,
        media::EntityType::Warranty => EntityType::Warranty,
        media::EntityType::Transaction => EntityType::Transaction,
        media::EntityType::User => EntityType::User,
    }
}

fn model_to_domain(m: media::Model) -> Media {
    Media {
        id: m.id,
        original_filename: m.original_filename,
        stored_filename: m.stored_filename,
        storage_key: m.storage_key,
        file_size: m.file_size,
        content_type: m.content_type,
        media_type: media_type_to_domain(m.media_type),
        entity_type: m.entity_type.map(entity_type_to_domain),
        entity_id: m.entity_id,
        uploaded_by: m.uploaded_by,
        description: m.description,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl MediaRepository for SeaOrmMediaRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Media>> {
        let model = media::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_entity(
        &self,
        entity_type: EntityType,
        entity_id: &str,
        media_type: Option<MediaType>,
    ) -> DomainResult<Vec<Media>> {
        let mut query = media::Entity::find()
            .filter(media::Column::EntityType.eq(entity_type_to_entity(entity_type)))
            .filter(media::Column::EntityId.eq(entity_id))
            .filter(media::Column::IsActive.eq(true));
        if let Some(t) = media_type {
            query = query.filter(media::Column::MediaType.eq(media_type_to_entity(t)));
        }

        let models = query
            .order_by_desc(media::Column::CreatedAt)
            .order_by_desc(media::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_uploader(
        &self,
        user_id: &str,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<Media>> {
        let query = media::Entity::find()
            .filter(media::Column::UploadedBy.eq(user_id))
            .filter(media::Column::IsActive.eq(true));
        self.fetch_page(query, page).await
    }

    async fn find_active(&self, page: PageRequest) -> DomainResult<PaginatedResult<Media>> {
        let query = media::Entity::find().filter(media::Column::IsActive.eq(true));
        self.fetch_page(query, page).await
    }

    async fn save(&self, m: Media) -> DomainResult<Media> {
        let model = media::ActiveModel {
            original_filename: Set(m.original_filename),
            stored_filename: Set(m.stored_filename),
            storage_key: Set(m.storage_key),
            file_size: Set(m.file_size),
            content_type: Set(m.content_type),
            media_type: Set(media_type_to_entity(m.media_type)),
            entity_type: Set(m.entity_type.map(entity_type_to_entity)),
            entity_id: Set(m.entity_id),
            uploaded_by: Set(m.uploaded_by),
            description: Set(m.description),
            is_active: Set(m.is_active),
            created_at: Set(m.created_at),
            updated_at: Set(m.updated_at),
            ..Default::default()
        };

        let inserted = model
            .insert(&self.db)
            .await
            .map_err(write_err("Stored filename already exists"))?;
        Ok(model_to_domain(inserted))
    }

    async fn deactivate(&self, id: i32) -> DomainResult<()> {
        let existing = media::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Media", "id", id))?;

        let mut active: media::ActiveModel = existing.into();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}
