use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::db_err;
use super::device_repository::{status_to_domain, status_to_entity};
use crate::domain::repair_session::RepairSessionRepository;
use crate::domain::{DomainError, DomainResult, RepairSession};
use crate::infrastructure::database::entities::repair_session;
use crate::shared::{PageRequest, PaginatedResult};

pub struct SeaOrmRepairSessionRepository {
    db: DatabaseConnection,
}

impl SeaOrmRepairSessionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: repair_session::Model) -> RepairSession {
    RepairSession {
        id: m.id,
        device_id: m.device_id,
        status: status_to_domain(m.status),
        received_date: m.received_date,
        expected_return_date: m.expected_return_date,
        note: m.note,
        assigned_to: m.assigned_to,
        created_by: m.created_by,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl RepairSessionRepository for SeaOrmRepairSessionRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<RepairSession>> {
        let model = repair_session::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_latest_for_device(&self, device_id: i32) -> DomainResult<Option<RepairSession>> {
        let model = repair_session::Entity::find()
            .filter(repair_session::Column::DeviceId.eq(device_id))
            .order_by_desc(repair_session::Column::CreatedAt)
            .order_by_desc(repair_session::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_device(&self, device_id: i32) -> DomainResult<Vec<RepairSession>> {
        let models = repair_session::Entity::find()
            .filter(repair_session::Column::DeviceId.eq(device_id))
            .order_by_desc(repair_session::Column::CreatedAt)
            .order_by_desc(repair_session::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn list(&self, page: PageRequest) -> DomainResult<PaginatedResult<RepairSession>> {
        let paginator = repair_session::Entity::find()
            .order_by_desc(repair_session::Column::CreatedAt)
            .order_by_desc(repair_session::Column::Id)
            .paginate(&self.db, page.limit as u64);

        let total = paginator.num_items().await.map_err(db_err)?;
        let models = paginator.fetch_page(page.index()).await.map_err(db_err)?;

        let items = models.into_iter().map(model_to_domain).collect();
        Ok(PaginatedResult::new(items, total, page.page, page.limit))
    }

    async fn save(&self, s: RepairSession) -> DomainResult<RepairSession> {
        let model = repair_session::ActiveModel {
            device_id: Set(s.device_id),
            status: Set(status_to_entity(s.status)),
            received_date: Set(s.received_date),
            expected_return_date: Set(s.expected_return_date),
            note: Set(s.note),
            assigned_to: Set(s.assigned_to),
            created_by: Set(s.created_by),
            created_at: Set(s.created_at),
            updated_at: Set(s.updated_at),
            ..Default::default()
        };

        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn update(&self, s: RepairSession) -> DomainResult<RepairSession> {
        let existing = repair_session::Entity::find_by_id(s.id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("RepairSession", "id", s.id))?;

        let mut active: repair_session::ActiveModel = existing.into();
        active.status = Set(status_to_entity(s.status));
        active.received_date = Set(s.received_date);
        active.expected_return_date = Set(s.expected_return_date);
        active.note = Set(s.note);
        active.assigned_to = Set(s.assigned_to);
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(updated))
    }
}
