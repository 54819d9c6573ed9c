//! Repair session aggregate: one visit of a device through the shop

pub mod model;
pub mod repository;

pub use model::RepairSession;
pub use repository::RepairSessionRepository;
