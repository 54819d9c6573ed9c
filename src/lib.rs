//! # FixSync
//!
//! Backend for a device repair shop: customer and device intake, repair
//! sessions and items priced from a service catalog, one payment per
//! device, warranties with lookup codes, a per-device audit trail and file
//! attachments.
//!
//! ## Layers
//!
//! - **domain**: entities, value rules and repository traits
//! - **application**: one service per area, holding the business rules
//! - **infrastructure**: SeaORM repositories, migrations, crypto, blob storage
//! - **interfaces**: axum REST API with Swagger UI
//! - **shared**: error type, pagination, shutdown signal

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};
pub use infrastructure::database::{init_database, DatabaseConfig};
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use interfaces::http::create_api_router;
