//! HTTP resource modules, one per aggregate
//!
//! Each module exposes `routes()` returning a `Router<AppState>` plus the
//! handlers and DTOs referenced by the OpenAPI document.

pub mod auth;
pub mod brands;
pub mod customers;
pub mod device_models;
pub mod devices;
pub mod health;
pub mod logs;
pub mod media;
pub mod metrics;
pub mod repair_items;
pub mod repair_sessions;
pub mod request_id;
pub mod service_catalog;
pub mod transactions;
pub mod users;
pub mod warranties;
