use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Select, Set,
};

use super::db_err;
use crate::domain::customer::CustomerRepository;
use crate::domain::{Customer, DomainError, DomainResult};
use crate::infrastructure::database::entities::customer;
use crate::shared::{PageRequest, PaginatedResult};

pub struct SeaOrmCustomerRepository {
    db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch_page(
        &self,
        query: Select<customer::Entity>,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<Customer>> {
        let paginator = query
            .order_by_desc(customer::Column::CreatedAt)
            .order_by_desc(customer::Column::Id)
            .paginate(&self.db, page.limit as u64);

        let total = paginator.num_items().await.map_err(db_err)?;
        let models = paginator.fetch_page(page.index()).await.map_err(db_err)?;

        let items = models.into_iter().map(model_to_domain).collect();
        Ok(PaginatedResult::new(items, total, page.page, page.limit))
    }
}

fn model_to_domain(m: customer::Model) -> Customer {
    Customer {
        id: m.id,
        name: m.name,
        phone: m.phone,
        email: m.email,
        address: m.address,
        note: m.note,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Customer>> {
        let model = customer::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list(&self, page: PageRequest) -> DomainResult<PaginatedResult<Customer>> {
        self.fetch_page(customer::Entity::find(), page).await
    }

    async fn search(
        &self,
        query: &str,
        page: PageRequest,
    ) -> DomainResult<PaginatedResult<Customer>> {
        let filter = Condition::any()
            .add(customer::Column::Name.contains(query))
            .add(customer::Column::Phone.contains(query))
            .add(customer::Column::Email.contains(query));
        self.fetch_page(customer::Entity::find().filter(filter), page)
            .await
    }

    async fn save(&self, c: Customer) -> DomainResult<Customer> {
        let model = customer::ActiveModel {
            name: Set(c.name),
            phone: Set(c.phone),
            email: Set(c.email),
            address: Set(c.address),
            note: Set(c.note),
            created_at: Set(c.created_at),
            updated_at: Set(c.updated_at),
            ..Default::default()
        };

        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn update(&self, c: Customer) -> DomainResult<Customer> {
        let existing = customer::Entity::find_by_id(c.id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Customer", "id", c.id))?;

        let mut active: customer::ActiveModel = existing.into();
        active.name = Set(c.name);
        active.phone = Set(c.phone);
        active.email = Set(c.email);
        active.address = Set(c.address);
        active.note = Set(c.note);
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(updated))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = customer::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Customer", "id", id));
        }
        Ok(())
    }
}
