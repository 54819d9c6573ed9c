use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::{db_err, eq_ignore_case};
use crate::domain::service_catalog::ServiceCatalogRepository;
use crate::domain::{DomainError, DomainResult, ServiceCatalog};
use crate::infrastructure::database::entities::service_catalog;
use crate::shared::{PageRequest, PaginatedResult};

pub struct SeaOrmServiceCatalogRepository {
    db: DatabaseConnection,
}

impl SeaOrmServiceCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: service_catalog::Model) -> ServiceCatalog {
    ServiceCatalog {
        id: m.id,
        name: m.name,
        description: m.description,
        base_cost: m.base_cost,
        default_part_used: m.default_part_used,
        default_warranty_months: m.default_warranty_months,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl ServiceCatalogRepository for SeaOrmServiceCatalogRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ServiceCatalog>> {
        let model = service_catalog::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<ServiceCatalog>> {
        let model = service_catalog::Entity::find()
            .filter(eq_ignore_case(service_catalog::Column::Name, name))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_active(&self) -> DomainResult<Vec<ServiceCatalog>> {
        let models = service_catalog::Entity::find()
            .filter(service_catalog::Column::IsActive.eq(true))
            .order_by_asc(service_catalog::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn list(&self, page: PageRequest) -> DomainResult<PaginatedResult<ServiceCatalog>> {
        let paginator = service_catalog::Entity::find()
            .order_by_asc(service_catalog::Column::Name)
            .paginate(&self.db, page.limit as u64);

        let total = paginator.num_items().await.map_err(db_err)?;
        let models = paginator.fetch_page(page.index()).await.map_err(db_err)?;

        let items = models.into_iter().map(model_to_domain).collect();
        Ok(PaginatedResult::new(items, total, page.page, page.limit))
    }

    async fn save(&self, s: ServiceCatalog) -> DomainResult<ServiceCatalog> {
        let model = service_catalog::ActiveModel {
            name: Set(s.name),
            description: Set(s.description),
            base_cost: Set(s.base_cost),
            default_part_used: Set(s.default_part_used),
            default_warranty_months: Set(s.default_warranty_months),
            is_active: Set(s.is_active),
            created_at: Set(s.created_at),
            updated_at: Set(s.updated_at),
            ..Default::default()
        };

        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn update(&self, s: ServiceCatalog) -> DomainResult<ServiceCatalog> {
        let existing = service_catalog::Entity::find_by_id(s.id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("ServiceCatalog", "id", s.id))?;

        let mut active: service_catalog::ActiveModel = existing.into();
        active.name = Set(s.name);
        active.description = Set(s.description);
        active.base_cost = Set(s.base_cost);
        active.default_part_used = Set(s.default_part_used);
        active.default_warranty_months = Set(s.default_warranty_months);
        active.is_active = Set(s.is_active);
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(updated))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = service_catalog::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("ServiceCatalog", "id", id));
        }
        Ok(())
    }
}
