use async_trait::async_trait;

use super::model::RepairItem;
use crate::domain::DomainResult;

#[async_trait]
pub trait RepairItemRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<RepairItem>>;
    /// Oldest first
    async fn find_by_device(&self, device_id: i32) -> DomainResult<Vec<RepairItem>>;
    async fn save(&self, item: RepairItem) -> DomainResult<RepairItem>;
    async fn update(&self, item: RepairItem) -> DomainResult<RepairItem>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
