//! Service catalog aggregate
//!
//! Reusable service templates that seed repair items with a label,
//! a base cost, a default part and a default warranty length.

pub mod model;
pub mod repository;

pub use model::ServiceCatalog;
pub use repository::ServiceCatalogRepository;
