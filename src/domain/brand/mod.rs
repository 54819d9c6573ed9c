//! Brand aggregate (device manufacturers)

pub mod model;
pub mod repository;

pub use model::Brand;
pub use repository::BrandRepository;
