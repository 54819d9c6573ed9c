//! Realtime audit log (append-only, per device)

pub mod model;
pub mod repository;

pub use model::{ActionType, NewRealtimeLog, RealtimeLog};
pub use repository::RealtimeLogRepository;
