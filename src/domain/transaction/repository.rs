use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::Transaction;
use crate::domain::DomainResult;
use crate::shared::{PageRequest, PaginatedResult};

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Transaction>>;
    /// Most recently created transaction of the device
    async fn find_latest_for_device(&self, device_id: i32) -> DomainResult<Option<Transaction>>;
    async fn find_by_device(&self, device_id: i32) -> DomainResult<Vec<Transaction>>;
    /// Whether the device already has a transaction other than `excluding`
    async fn exists_for_device(&self, device_id: i32, excluding: Option<i32>) -> DomainResult<bool>;
    async fn list(&self, page: PageRequest) -> DomainResult<PaginatedResult<Transaction>>;
    /// Transactions created within `[start, end]`
    async fn find_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<Transaction>>;
    async fn save(&self, tx: Transaction) -> DomainResult<Transaction>;
    async fn update(&self, tx: Transaction) -> DomainResult<Transaction>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
