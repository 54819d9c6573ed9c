use async_trait::async_trait;

use super::model::{ActionType, NewRealtimeLog, RealtimeLog};
use crate::domain::DomainResult;

/// Append and read only. Log rows are removed solely by the device cascade.
#[async_trait]
pub trait RealtimeLogRepository: Send + Sync {
    async fn append(&self, device_id: i32, log: NewRealtimeLog) -> DomainResult<RealtimeLog>;
    /// Newest first, optionally restricted to one action.
    async fn find_by_device(
        &self,
        device_id: i32,
        action: Option<ActionType>,
    ) -> DomainResult<Vec<RealtimeLog>>;
}
