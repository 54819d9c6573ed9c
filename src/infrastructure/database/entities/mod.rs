//! Database entities module

pub mod brand;
pub mod customer;
pub mod device;
pub mod device_model;
pub mod media;
pub mod realtime_log;
pub mod repair_item;
pub mod repair_session;
pub mod service_catalog;
pub mod transaction;
pub mod user;
pub mod warranty;

pub use brand::Entity as Brand;
pub use customer::Entity as Customer;
pub use device::Entity as Device;
pub use device_model::Entity as DeviceModel;
pub use media::Entity as Media;
pub use realtime_log::Entity as RealtimeLog;
pub use repair_item::Entity as RepairItem;
pub use repair_session::Entity as RepairSession;
pub use service_catalog::Entity as ServiceCatalog;
pub use transaction::Entity as Transaction;
pub use user::Entity as User;
pub use warranty::Entity as Warranty;
