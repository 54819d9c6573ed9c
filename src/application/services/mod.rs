//! Application services, one per resource area

mod brand;
mod customer;
mod device;
mod device_model;
mod media;
mod realtime_log;
mod repair_item;
mod repair_session;
mod service_catalog;
mod transaction;
mod warranty;

pub use brand::{BrandService, BrandUpdate};
pub use customer::{CustomerInput, CustomerService};
pub use device::{CreateDevice, DeviceDetails, DeviceService, UpdateDevice};
pub use device_model::{DeviceModelInput, DeviceModelService, DeviceModelUpdate};
pub use media::{MediaDownload, MediaService, UploadMedia};
pub use realtime_log::RealtimeLogService;
pub use repair_item::{RepairItemInput, RepairItemService};
pub use repair_session::{CreateRepairSession, RepairSessionService, UpdateRepairSession};
pub use service_catalog::{ServiceCatalogInput, ServiceCatalogService, ServiceCatalogUpdate};
pub use transaction::{TransactionInput, TransactionService};
pub use warranty::{CreateWarranty, UpdateWarranty, WarrantyService};

use crate::domain::{
    Device, DomainError, DomainResult, RepairSession, RepositoryProvider, User,
};

// ── Shared lookups ──────────────────────────────────────────────

pub(crate) async fn require_device(
    repos: &dyn RepositoryProvider,
    device_id: i32,
) -> DomainResult<Device> {
    repos
        .devices()
        .find_by_id(device_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Device", "id", device_id))
}

pub(crate) async fn require_user(repos: &dyn RepositoryProvider, user_id: &str) -> DomainResult<User> {
    repos
        .users()
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| DomainError::not_found("User", "id", user_id))
}

/// Session a new child record attaches to: the explicit session (which must
/// belong to the device), else the device's most recent session, else none.
pub(crate) async fn resolve_session(
    repos: &dyn RepositoryProvider,
    device_id: i32,
    explicit: Option<i32>,
) -> DomainResult<Option<RepairSession>> {
    match explicit {
        Some(session_id) => {
            let session = repos
                .repair_sessions()
                .find_by_id(session_id)
                .await?
                .ok_or_else(|| DomainError::not_found("RepairSession", "id", session_id))?;
            if session.device_id != device_id {
                return Err(DomainError::Validation(format!(
                    "Repair session {} does not belong to device {}",
                    session_id, device_id
                )));
            }
            Ok(Some(session))
        }
        None => repos.repair_sessions().find_latest_for_device(device_id).await,
    }
}

/// Trimmed value, or `None` for missing/blank input
pub(crate) fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
