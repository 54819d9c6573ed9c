use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::{db_err, write_err};
use crate::domain::warranty::WarrantyRepository;
use crate::domain::{DomainError, DomainResult, Warranty};
use crate::infrastructure::database::entities::warranty;

pub struct SeaOrmWarrantyRepository {
    db: DatabaseConnection,
}

impl SeaOrmWarrantyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: warranty::Model) -> Warranty {
    Warranty {
        id: m.id,
        device_id: m.device_id,
        repair_session_id: m.repair_session_id,
        repair_item_id: m.repair_item_id,
        warranty_months: m.warranty_months,
        start_date: m.start_date,
        end_date: m.end_date,
        warranty_code: m.warranty_code,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl WarrantyRepository for SeaOrmWarrantyRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Warranty>> {
        let model = warranty::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_code(&self, code: &str) -> DomainResult<Option<Warranty>> {
        let model = warranty::Entity::find()
            .filter(warranty::Column::WarrantyCode.eq(code))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_device(&self, device_id: i32) -> DomainResult<Vec<Warranty>> {
        let models = warranty::Entity::find()
            .filter(warranty::Column::DeviceId.eq(device_id))
            .order_by_desc(warranty::Column::CreatedAt)
            .order_by_desc(warranty::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_expiring_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<Warranty>> {
        let models = warranty::Entity::find()
            .filter(warranty::Column::EndDate.between(start, end))
            .order_by_asc(warranty::Column::EndDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_expired(&self, now: DateTime<Utc>) -> DomainResult<Vec<Warranty>> {
        let models = warranty::Entity::find()
            .filter(warranty::Column::EndDate.lt(now))
            .order_by_asc(warranty::Column::EndDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn save(&self, w: Warranty) -> DomainResult<Warranty> {
        let model = warranty::ActiveModel {
            device_id: Set(w.device_id),
            repair_session_id: Set(w.repair_session_id),
            repair_item_id: Set(w.repair_item_id),
            warranty_months: Set(w.warranty_months),
            start_date: Set(w.start_date),
            end_date: Set(w.end_date),
            warranty_code: Set(w.warranty_code),
            created_at: Set(w.created_at),
            updated_at: Set(w.updated_at),
            ..Default::default()
        };

        let inserted = model
            .insert(&self.db)
            .await
            .map_err(write_err("Warranty code already exists"))?;
        Ok(model_to_domain(inserted))
    }

    async fn update(&self, w: Warranty) -> DomainResult<Warranty> {
        let existing = warranty::Entity::find_by_id(w.id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Warranty", "id", w.id))?;

        // Code, device and start date are fixed at creation.
        let mut active: warranty::ActiveModel = existing.into();
        active.repair_session_id = Set(w.repair_session_id);
        active.repair_item_id = Set(w.repair_item_id);
        active.warranty_months = Set(w.warranty_months);
        active.end_date = Set(w.end_date);
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(updated))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = warranty::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Warranty", "id", id));
        }
        Ok(())
    }
}
