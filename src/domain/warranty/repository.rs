use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::Warranty;
use crate::domain::DomainResult;

#[async_trait]
pub trait WarrantyRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Warranty>>;
    async fn find_by_code(&self, code: &str) -> DomainResult<Option<Warranty>>;
    async fn find_by_device(&self, device_id: i32) -> DomainResult<Vec<Warranty>>;
    /// Warranties whose end date falls within `[start, end]`
    async fn find_expiring_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<Warranty>>;
    /// Warranties whose end date is before `now`
    async fn find_expired(&self, now: DateTime<Utc>) -> DomainResult<Vec<Warranty>>;
    async fn save(&self, warranty: Warranty) -> DomainResult<Warranty>;
    async fn update(&self, warranty: Warranty) -> DomainResult<Warranty>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
