use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::{db_err, eq_ignore_case, write_err};
use crate::domain::device_model::DeviceModelRepository;
use crate::domain::{DeviceModel, DomainError, DomainResult};
use crate::infrastructure::database::entities::device_model;

pub struct SeaOrmDeviceModelRepository {
    db: DatabaseConnection,
}

impl SeaOrmDeviceModelRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: device_model::Model) -> DeviceModel {
    DeviceModel {
        id: m.id,
        brand_id: m.brand_id,
        name: m.name,
        device_type: m.device_type,
        description: m.description,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

const DUPLICATE: &str = "Model name already exists for this brand";

#[async_trait]
impl DeviceModelRepository for SeaOrmDeviceModelRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<DeviceModel>> {
        let model = device_model::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_brand_and_name(
        &self,
        brand_id: i32,
        name: &str,
    ) -> DomainResult<Option<DeviceModel>> {
        let model = device_model::Entity::find()
            .filter(device_model::Column::BrandId.eq(brand_id))
            .filter(eq_ignore_case(device_model::Column::Name, name))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_active_by_brand(&self, brand_id: i32) -> DomainResult<Vec<DeviceModel>> {
        let models = device_model::Entity::find()
            .filter(device_model::Column::BrandId.eq(brand_id))
            .filter(device_model::Column::IsActive.eq(true))
            .order_by_asc(device_model::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_device_type(&self, device_type: &str) -> DomainResult<Vec<DeviceModel>> {
        let models = device_model::Entity::find()
            .filter(eq_ignore_case(device_model::Column::DeviceType, device_type))
            .order_by_asc(device_model::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn save(&self, m: DeviceModel) -> DomainResult<DeviceModel> {
        let model = device_model::ActiveModel {
            brand_id: Set(m.brand_id),
            name: Set(m.name),
            device_type: Set(m.device_type),
            description: Set(m.description),
            is_active: Set(m.is_active),
            created_at: Set(m.created_at),
            updated_at: Set(m.updated_at),
            ..Default::default()
        };

        let inserted = model.insert(&self.db).await.map_err(write_err(DUPLICATE))?;
        Ok(model_to_domain(inserted))
    }

    async fn update(&self, m: DeviceModel) -> DomainResult<DeviceModel> {
        let existing = device_model::Entity::find_by_id(m.id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("DeviceModel", "id", m.id))?;

        let mut active: device_model::ActiveModel = existing.into();
        active.brand_id = Set(m.brand_id);
        active.name = Set(m.name);
        active.device_type = Set(m.device_type);
        active.description = Set(m.description);
        active.is_active = Set(m.is_active);
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(write_err(DUPLICATE))?;
        Ok(model_to_domain(updated))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = device_model::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("DeviceModel", "id", id));
        }
        Ok(())
    }
}
