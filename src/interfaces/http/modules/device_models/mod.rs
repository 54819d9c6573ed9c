//! Device models module

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
