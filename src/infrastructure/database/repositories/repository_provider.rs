//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::brand::BrandRepository;
use crate::domain::customer::CustomerRepository;
use crate::domain::device::DeviceRepository;
use crate::domain::device_model::DeviceModelRepository;
use crate::domain::media::MediaRepository;
use crate::domain::realtime_log::RealtimeLogRepository;
use crate::domain::repair_item::RepairItemRepository;
use crate::domain::repair_session::RepairSessionRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::service_catalog::ServiceCatalogRepository;
use crate::domain::transaction::TransactionRepository;
use crate::domain::user::UserRepository;
use crate::domain::warranty::WarrantyRepository;

use super::brand_repository::SeaOrmBrandRepository;
use super::customer_repository::SeaOrmCustomerRepository;
use super::device_model_repository::SeaOrmDeviceModelRepository;
use super::device_repository::SeaOrmDeviceRepository;
use super::media_repository::SeaOrmMediaRepository;
use super::realtime_log_repository::SeaOrmRealtimeLogRepository;
use super::repair_item_repository::SeaOrmRepairItemRepository;
use super::repair_session_repository::SeaOrmRepairSessionRepository;
use super::service_catalog_repository::SeaOrmServiceCatalogRepository;
use super::transaction_repository::SeaOrmTransactionRepository;
use super::user_repository::SeaOrmUserRepository;
use super::warranty_repository::SeaOrmWarrantyRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let device = repos.devices().find_by_id(7).await?;
/// let payment = repos.transactions().find_latest_for_device(7).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    customers: SeaOrmCustomerRepository,
    brands: SeaOrmBrandRepository,
    device_models: SeaOrmDeviceModelRepository,
    service_catalog: SeaOrmServiceCatalogRepository,
    devices: SeaOrmDeviceRepository,
    repair_sessions: SeaOrmRepairSessionRepository,
    repair_items: SeaOrmRepairItemRepository,
    transactions: SeaOrmTransactionRepository,
    warranties: SeaOrmWarrantyRepository,
    realtime_logs: SeaOrmRealtimeLogRepository,
    media: SeaOrmMediaRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            customers: SeaOrmCustomerRepository::new(db.clone()),
            brands: SeaOrmBrandRepository::new(db.clone()),
            device_models: SeaOrmDeviceModelRepository::new(db.clone()),
            service_catalog: SeaOrmServiceCatalogRepository::new(db.clone()),
            devices: SeaOrmDeviceRepository::new(db.clone()),
            repair_sessions: SeaOrmRepairSessionRepository::new(db.clone()),
            repair_items: SeaOrmRepairItemRepository::new(db.clone()),
            transactions: SeaOrmTransactionRepository::new(db.clone()),
            warranties: SeaOrmWarrantyRepository::new(db.clone()),
            realtime_logs: SeaOrmRealtimeLogRepository::new(db.clone()),
            media: SeaOrmMediaRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn customers(&self) -> &dyn CustomerRepository {
        &self.customers
    }

    fn brands(&self) -> &dyn BrandRepository {
        &self.brands
    }

    fn device_models(&self) -> &dyn DeviceModelRepository {
        &self.device_models
    }

    fn service_catalog(&self) -> &dyn ServiceCatalogRepository {
        &self.service_catalog
    }

    fn devices(&self) -> &dyn DeviceRepository {
        &self.devices
    }

    fn repair_sessions(&self) -> &dyn RepairSessionRepository {
        &self.repair_sessions
    }

    fn repair_items(&self) -> &dyn RepairItemRepository {
        &self.repair_items
    }

    fn transactions(&self) -> &dyn TransactionRepository {
        &self.transactions
    }

    fn warranties(&self) -> &dyn WarrantyRepository {
        &self.warranties
    }

    fn realtime_logs(&self) -> &dyn RealtimeLogRepository {
        &self.realtime_logs
    }

    fn media(&self) -> &dyn MediaRepository {
        &self.media
    }
}
