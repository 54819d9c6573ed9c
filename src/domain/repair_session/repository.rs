use async_trait::async_trait;

use super::model::RepairSession;
use crate::domain::DomainResult;
use crate::shared::{PageRequest, PaginatedResult};

#[async_trait]
pub trait RepairSessionRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<RepairSession>>;
    /// Most recently created session of the device
    async fn find_latest_for_device(&self, device_id: i32) -> DomainResult<Option<RepairSession>>;
    async fn find_by_device(&self, device_id: i32) -> DomainResult<Vec<RepairSession>>;
    async fn list(&self, page: PageRequest) -> DomainResult<PaginatedResult<RepairSession>>;
    async fn save(&self, session: RepairSession) -> DomainResult<RepairSession>;
    async fn update(&self, session: RepairSession) -> DomainResult<RepairSession>;
}
