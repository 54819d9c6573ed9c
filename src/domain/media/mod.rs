//! Media aggregate: files attached to shop records

pub mod model;
pub mod repository;

pub use model::{EntityType, Media, MediaType, ALLOWED_CONTENT_TYPES};
pub use repository::MediaRepository;
