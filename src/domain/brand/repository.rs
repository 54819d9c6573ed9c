use async_trait::async_trait;

use super::model::Brand;
use crate::domain::DomainResult;
use crate::shared::{PageRequest, PaginatedResult};

#[async_trait]
pub trait BrandRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Brand>>;
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Brand>>;
    async fn find_active(&self) -> DomainResult<Vec<Brand>>;
    async fn list(&self, page: PageRequest) -> DomainResult<PaginatedResult<Brand>>;
    async fn save(&self, brand: Brand) -> DomainResult<Brand>;
    async fn update(&self, brand: Brand) -> DomainResult<Brand>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
