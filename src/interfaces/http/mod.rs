//! HTTP REST API
//!
//! - `common`: response envelope, pagination, error mapping, `ValidatedJson`
//! - `middleware`: JWT authentication and role checks
//! - `modules`: one module per resource (`dto` + `handlers`)
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use common::*;
pub use router::{create_api_router, AppState};
