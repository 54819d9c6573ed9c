//! Warranty aggregate

pub mod model;
pub mod repository;

pub use model::{coverage_end, generate_warranty_code, is_valid_warranty_code, Warranty};
pub use repository::WarrantyRepository;
