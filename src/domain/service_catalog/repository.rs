use async_trait::async_trait;

use super::model::ServiceCatalog;
use crate::domain::DomainResult;
use crate::shared::{PageRequest, PaginatedResult};

#[async_trait]
pub trait ServiceCatalogRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ServiceCatalog>>;
    /// Case-insensitive name lookup
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<ServiceCatalog>>;
    async fn find_active(&self) -> DomainResult<Vec<ServiceCatalog>>;
    async fn list(&self, page: PageRequest) -> DomainResult<PaginatedResult<ServiceCatalog>>;
    async fn save(&self, entry: ServiceCatalog) -> DomainResult<ServiceCatalog>;
    async fn update(&self, entry: ServiceCatalog) -> DomainResult<ServiceCatalog>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
