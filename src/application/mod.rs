//! Application layer: use-case services over the domain repositories.
//!
//! Every mutating call that needs attribution takes the acting staff id as
//! an explicit argument; nothing reads a global "current user".

pub mod identity;
pub mod services;

pub use identity::{AuthResult, CreateUser, UpdateUser, UserService};
pub use services::{
    BrandService, CustomerService, DeviceDetails, DeviceModelService, DeviceService, MediaService,
    RealtimeLogService, RepairItemService, RepairSessionService, ServiceCatalogService,
    TransactionService, WarrantyService,
};
