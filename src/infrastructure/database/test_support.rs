//! Fresh migrated in-memory databases plus seed helpers for tests

use std::sync::Arc;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use super::migrator::Migrator;
use super::repositories::SeaOrmRepositoryProvider;
use crate::domain::{
    ActionType, Brand, Device, DeviceModel, NewRealtimeLog, RepositoryProvider, User, UserRole,
};

/// Single-connection in-memory SQLite with all migrations applied.
/// A second connection would open a different empty database.
pub async fn memory_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub async fn memory_repos() -> Arc<dyn RepositoryProvider> {
    Arc::new(SeaOrmRepositoryProvider::new(memory_db().await))
}

pub async fn seed_user(repos: &dyn RepositoryProvider, email: &str, role: UserRole) -> User {
    let user = User::new("Test User", email, "not-a-real-hash", role);
    repos.users().save(user).await.unwrap()
}

pub async fn seed_brand_and_model(
    repos: &dyn RepositoryProvider,
    device_type: &str,
) -> (Brand, DeviceModel) {
    let name = format!("Acme-{}", &uuid::Uuid::new_v4().simple().to_string()[..8]);
    let brand = repos.brands().save(Brand::new(name)).await.unwrap();
    let model = repos
        .device_models()
        .save(DeviceModel::new(brand.id, "Phone X", device_type))
        .await
        .unwrap();
    (brand, model)
}

/// Inserts a device directly through the repository (with its CREATED log)
pub async fn seed_device(repos: &dyn RepositoryProvider, created_by: &str) -> Device {
    let (brand, model) = seed_brand_and_model(repos, "PHONE").await;
    let mut device = Device::new(brand.id, model.id, created_by);
    device.device_type = model.device_type.clone();
    repos
        .devices()
        .create(
            device,
            NewRealtimeLog::new(ActionType::Created, "seeded", created_by),
        )
        .await
        .unwrap()
}
