use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::{db_err, eq_ignore_case, write_err};
use crate::domain::user::UserRepository;
use crate::domain::{DomainError, DomainResult, User, UserRole};
use crate::infrastructure::database::entities::user;
use crate::shared::{PageRequest, PaginatedResult};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Admin => UserRole::Admin,
        user::UserRole::Technician => UserRole::Technician,
        user::UserRole::Receptionist => UserRole::Receptionist,
    }
}

fn domain_role_to_entity(role: &UserRole) -> user::UserRole {
    match role {
        UserRole::Admin => user::UserRole::Admin,
        UserRole::Technician => user::UserRole::Technician,
        UserRole::Receptionist => user::UserRole::Receptionist,
    }
}

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        full_name: model.full_name,
        email: model.email,
        password_hash: model.password_hash,
        phone: model.phone,
        role: entity_role_to_domain(model.role),
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
        last_login_at: model.last_login_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(eq_ignore_case(user::Column::Email, email))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn list(&self, page: PageRequest) -> DomainResult<PaginatedResult<User>> {
        let paginator = user::Entity::find()
            .order_by_desc(user::Column::CreatedAt)
            .paginate(&self.db, page.limit as u64);

        let total = paginator.num_items().await.map_err(db_err)?;
        let models = paginator.fetch_page(page.index()).await.map_err(db_err)?;

        let items = models.into_iter().map(user_model_to_domain).collect();
        Ok(PaginatedResult::new(items, total, page.page, page.limit))
    }

    async fn count(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn save(&self, u: User) -> DomainResult<User> {
        let model = user::ActiveModel {
            id: Set(u.id),
            full_name: Set(u.full_name),
            email: Set(u.email),
            password_hash: Set(u.password_hash),
            phone: Set(u.phone),
            role: Set(domain_role_to_entity(&u.role)),
            is_active: Set(u.is_active),
            created_at: Set(u.created_at),
            updated_at: Set(u.updated_at),
            last_login_at: Set(u.last_login_at),
        };

        let inserted = model
            .insert(&self.db)
            .await
            .map_err(write_err("Email already registered"))?;
        Ok(user_model_to_domain(inserted))
    }

    async fn update(&self, u: User) -> DomainResult<User> {
        let existing = user::Entity::find_by_id(u.id.clone())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("User", "id", &u.id))?;

        let mut active: user::ActiveModel = existing.into();
        active.full_name = Set(u.full_name);
        active.email = Set(u.email);
        active.password_hash = Set(u.password_hash);
        active.phone = Set(u.phone);
        active.role = Set(domain_role_to_entity(&u.role));
        active.is_active = Set(u.is_active);
        active.updated_at = Set(Utc::now());

        let updated = active
            .update(&self.db)
            .await
            .map_err(write_err("Email already registered"))?;
        Ok(user_model_to_domain(updated))
    }

    async fn record_login(&self, id: &str) -> DomainResult<()> {
        let existing = user::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("User", "id", id))?;

        let mut active: user::ActiveModel = existing.into();
        active.last_login_at = Set(Some(Utc::now()));
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = user::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("User", "id", id));
        }
        Ok(())
    }
}
