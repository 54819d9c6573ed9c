use async_trait::async_trait;

use super::model::User;
use crate::domain::DomainResult;
use crate::shared::{PageRequest, PaginatedResult};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn list(&self, page: PageRequest) -> DomainResult<PaginatedResult<User>>;
    async fn count(&self) -> DomainResult<u64>;
    async fn save(&self, user: User) -> DomainResult<User>;
    async fn update(&self, user: User) -> DomainResult<User>;
    async fn record_login(&self, id: &str) -> DomainResult<()>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
