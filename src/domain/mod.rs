//! Domain layer: entities, value types and repository interfaces.
//!
//! Every aggregate lives in its own module with a `model` and a
//! `repository` file. Nothing here knows about SeaORM or HTTP.

pub mod brand;
pub mod customer;
pub mod device;
pub mod device_model;
pub mod media;
pub mod realtime_log;
pub mod repair_item;
pub mod repair_session;
pub mod repositories;
pub mod service_catalog;
pub mod transaction;
pub mod user;
pub mod warranty;

pub use brand::Brand;
pub use customer::Customer;
pub use device::{Device, DeviceBalance, DeviceStatus};
pub use device_model::DeviceModel;
pub use media::{EntityType, Media, MediaType};
pub use realtime_log::{ActionType, NewRealtimeLog, RealtimeLog};
pub use repair_item::{RepairItem, RepairItemDraft};
pub use repair_session::RepairSession;
pub use repositories::RepositoryProvider;
pub use service_catalog::ServiceCatalog;
pub use transaction::{PaymentMethod, Transaction};
pub use user::{User, UserRole};
pub use warranty::Warranty;

pub use crate::shared::errors::{DomainError, DomainResult};
