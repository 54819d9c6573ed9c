//! Device aggregate
//!
//! A device is one physical intake and the aggregate root for its repair
//! sessions, repair items, transactions, warranties and audit log.

pub mod balance;
pub mod model;
pub mod repository;

pub use balance::DeviceBalance;
pub use model::{Device, DeviceStatus, UNKNOWN_DEVICE_TYPE};
pub use repository::DeviceRepository;
