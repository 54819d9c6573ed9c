//! Infrastructure layer: database, crypto and blob storage adapters

pub mod crypto;
pub mod database;
pub mod storage;
