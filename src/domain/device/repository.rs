//! Device repository interface
//!
//! State-changing writes take the audit entries they produce so that the
//! device row and its log rows are committed together.

use async_trait::async_trait;

use super::model::Device;
use crate::domain::realtime_log::NewRealtimeLog;
use crate::domain::DomainResult;
use crate::shared::{PageRequest, PaginatedResult};

#[async_trait]
pub trait DeviceRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Device>>;
    async fn list(&self, page: PageRequest) -> DomainResult<PaginatedResult<Device>>;
    /// Insert the device and its creation log entry atomically.
    async fn create(&self, device: Device, log: NewRealtimeLog) -> DomainResult<Device>;
    /// Persist the device and append `logs` atomically.
    async fn update(&self, device: Device, logs: Vec<NewRealtimeLog>) -> DomainResult<Device>;
    /// Delete the device together with its logs, warranties, transactions,
    /// repair items and repair sessions.
    async fn delete_cascade(&self, id: i32) -> DomainResult<()>;
}
