//! Repository provider for the domain layer
//!
//! Services depend on `RepositoryProvider` and request only the repository
//! they need:
//!
//! ```ignore
//! async fn handle(repos: &dyn RepositoryProvider) -> DomainResult<()> {
//!     let device = repos.devices().find_by_id(7).await?;
//!     let items = repos.repair_items().find_by_device(7).await?;
//!     Ok(())
//! }
//! ```

use super::brand::BrandRepository;
use super::customer::CustomerRepository;
use super::device::DeviceRepository;
use super::device_model::DeviceModelRepository;
use super::media::MediaRepository;
use super::realtime_log::RealtimeLogRepository;
use super::repair_item::RepairItemRepository;
use super::repair_session::RepairSessionRepository;
use super::service_catalog::ServiceCatalogRepository;
use super::transaction::TransactionRepository;
use super::user::UserRepository;
use super::warranty::WarrantyRepository;

pub use crate::shared::errors::DomainResult;

// ── RepositoryProvider ──────────────────────────────────────────

pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn customers(&self) -> &dyn CustomerRepository;
    fn brands(&self) -> &dyn BrandRepository;
    fn device_models(&self) -> &dyn DeviceModelRepository;
    fn service_catalog(&self) -> &dyn ServiceCatalogRepository;
    fn devices(&self) -> &dyn DeviceRepository;
    fn repair_sessions(&self) -> &dyn RepairSessionRepository;
    fn repair_items(&self) -> &dyn RepairItemRepository;
    fn transactions(&self) -> &dyn TransactionRepository;
    fn warranties(&self) -> &dyn WarrantyRepository;
    fn realtime_logs(&self) -> &dyn RealtimeLogRepository;
    fn media(&self) -> &dyn MediaRepository;
}
