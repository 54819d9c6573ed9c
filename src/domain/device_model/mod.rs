//! Device model aggregate (a model under a brand)

pub mod model;
pub mod repository;

pub use model::DeviceModel;
pub use repository::DeviceModelRepository;
