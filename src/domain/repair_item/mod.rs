//! Repair item aggregate: priced line items of work done on a device

pub mod model;
pub mod repository;

pub use model::{RepairItem, RepairItemDraft};
pub use repository::RepairItemRepository;
