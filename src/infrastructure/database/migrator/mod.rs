//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users;
mod m20240101_000002_create_customers;
mod m20240101_000003_create_brands;
mod m20240101_000004_create_device_models;
mod m20240101_000005_create_service_catalog;
mod m20240101_000006_create_devices;
mod m20240101_000007_create_repair_sessions;
mod m20240101_000008_create_repair_items;
mod m20240101_000009_create_transactions;
mod m20240101_000010_create_warranties;
mod m20240101_000011_create_realtime_logs;
mod m20240101_000012_create_media;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users::Migration),
            Box::new(m20240101_000002_create_customers::Migration),
            Box::new(m20240101_000003_create_brands::Migration),
            Box::new(m20240101_000004_create_device_models::Migration),
            Box::new(m20240101_000005_create_service_catalog::Migration),
            Box::new(m20240101_000006_create_devices::Migration),
            Box::new(m20240101_000007_create_repair_sessions::Migration),
            Box::new(m20240101_000008_create_repair_items::Migration),
            Box::new(m20240101_000009_create_transactions::Migration),
            Box::new(m20240101_000010_create_warranties::Migration),
            Box::new(m20240101_000011_create_realtime_logs::Migration),
            Box::new(m20240101_000012_create_media::Migration),
        ]
    }
}
