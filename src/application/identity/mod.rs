//! Staff accounts and authentication
//!
//! Contains the `UserService` which orchestrates login, account
//! management and the bootstrap admin.

pub mod service;

pub use service::{AuthResult, CreateUser, UpdateUser, UserService};
