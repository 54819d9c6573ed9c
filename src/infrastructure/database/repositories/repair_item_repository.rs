use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::db_err;
use crate::domain::repair_item::RepairItemRepository;
use crate::domain::{DomainError, DomainResult, RepairItem};
use crate::infrastructure::database::entities::repair_item;

pub struct SeaOrmRepairItemRepository {
    db: DatabaseConnection,
}

impl SeaOrmRepairItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: repair_item::Model) -> RepairItem {
    RepairItem {
        id: m.id,
        device_id: m.device_id,
        repair_session_id: m.repair_session_id,
        service_catalog_id: m.service_catalog_id,
        service_name: m.service_name,
        part_used: m.part_used,
        cost: m.cost,
        warranty_months: m.warranty_months,
        description: m.description,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl RepairItemRepository for SeaOrmRepairItemRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<RepairItem>> {
        let model = repair_item::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_device(&self, device_id: i32) -> DomainResult<Vec<RepairItem>> {
        let models = repair_item::Entity::find()
            .filter(repair_item::Column::DeviceId.eq(device_id))
            .order_by_asc(repair_item::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn save(&self, item: RepairItem) -> DomainResult<RepairItem> {
        let model = repair_item::ActiveModel {
            device_id: Set(item.device_id),
            repair_session_id: Set(item.repair_session_id),
            service_catalog_id: Set(item.service_catalog_id),
            service_name: Set(item.service_name),
            part_used: Set(item.part_used),
            cost: Set(item.cost),
            warranty_months: Set(item.warranty_months),
            description: Set(item.description),
            created_at: Set(item.created_at),
            updated_at: Set(item.updated_at),
            ..Default::default()
        };

        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn update(&self, item: RepairItem) -> DomainResult<RepairItem> {
        let existing = repair_item::Entity::find_by_id(item.id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("RepairItem", "id", item.id))?;

        let mut active: repair_item::ActiveModel = existing.into();
        active.repair_session_id = Set(item.repair_session_id);
        active.service_catalog_id = Set(item.service_catalog_id);
        active.service_name = Set(item.service_name);
        active.part_used = Set(item.part_used);
        active.cost = Set(item.cost);
        active.warranty_months = Set(item.warranty_months);
        active.description = Set(item.description);
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(updated))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = repair_item::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("RepairItem", "id", id));
        }
        Ok(())
    }
}
