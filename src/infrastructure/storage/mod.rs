//! Blob storage for uploaded media

mod local;
mod memory;
mod traits;

pub use local::LocalFileStorage;
pub use memory::InMemoryFileStorage;
pub use traits::{FileStorage, StoredObject};
