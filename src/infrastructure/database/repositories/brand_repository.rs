use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::{db_err, eq_ignore_case, write_err};
use crate::domain::brand::BrandRepository;
use crate::domain::{Brand, DomainError, DomainResult};
use crate::infrastructure::database::entities::brand;
use crate::shared::{PageRequest, PaginatedResult};

pub struct SeaOrmBrandRepository {
    db: DatabaseConnection,
}

impl SeaOrmBrandRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: brand::Model) -> Brand {
    Brand {
        id: m.id,
        name: m.name,
        description: m.description,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl BrandRepository for SeaOrmBrandRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Brand>> {
        let model = brand::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Brand>> {
        let model = brand::Entity::find()
            .filter(eq_ignore_case(brand::Column::Name, name))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_active(&self) -> DomainResult<Vec<Brand>> {
        let models = brand::Entity::find()
            .filter(brand::Column::IsActive.eq(true))
            .order_by_asc(brand::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn list(&self, page: PageRequest) -> DomainResult<PaginatedResult<Brand>> {
        let paginator = brand::Entity::find()
            .order_by_asc(brand::Column::Name)
            .paginate(&self.db, page.limit as u64);

        let total = paginator.num_items().await.map_err(db_err)?;
        let models = paginator.fetch_page(page.index()).await.map_err(db_err)?;

        let items = models.into_iter().map(model_to_domain).collect();
        Ok(PaginatedResult::new(items, total, page.page, page.limit))
    }

    async fn save(&self, b: Brand) -> DomainResult<Brand> {
        let model = brand::ActiveModel {
            name: Set(b.name),
            description: Set(b.description),
            is_active: Set(b.is_active),
            created_at: Set(b.created_at),
            updated_at: Set(b.updated_at),
            ..Default::default()
        };

        let inserted = model
            .insert(&self.db)
            .await
            .map_err(write_err("Brand name already exists"))?;
        Ok(model_to_domain(inserted))
    }

    async fn update(&self, b: Brand) -> DomainResult<Brand> {
        let existing = brand::Entity::find_by_id(b.id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Brand", "id", b.id))?;

        let mut active: brand::ActiveModel = existing.into();
        active.name = Set(b.name);
        active.description = Set(b.description);
        active.is_active = Set(b.is_active);
        active.updated_at = Set(Utc::now());

        let updated = active
            .update(&self.db)
            .await
            .map_err(write_err("Brand name already exists"))?;
        Ok(model_to_domain(updated))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = brand::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Brand", "id", id));
        }
        Ok(())
    }
}
