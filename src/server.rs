//! Server runtime: tracing, database bootstrap, HTTP serving and shutdown.
//!
//! The binary calls [`init_tracing`] once, then either [`migrate`] or
//! [`ServerHandle::start`] followed by [`ServerHandle::wait`].

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::config::{AppConfig, StorageBackend, StorageConfig};
use crate::infrastructure::database::init_database;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::storage::{FileStorage, InMemoryFileStorage, LocalFileStorage};
use crate::interfaces::http::{create_api_router, AppState};
use crate::shared::ShutdownSignal;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub struct ServerOptions {
    pub config: AppConfig,
    /// Apply pending migrations before serving
    pub auto_migrate: bool,
    /// Create the configured admin when no user exists
    pub create_default_admin: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            create_default_admin: true,
        }
    }
}

/// Running HTTP server plus what is needed to stop it cleanly
pub struct ServerHandle {
    pub config: AppConfig,
    db: DatabaseConnection,
    shutdown: ShutdownSignal,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    pub async fn start(opts: ServerOptions) -> Result<Self, BoxError> {
        let config = opts.config;
        info!("Starting FixSync service");

        let prometheus = prometheus_handle();

        let db = init_database(&config.database_config()).await?;
        if opts.auto_migrate {
            info!("Running database migrations");
            Migrator::up(&db, None).await?;
        }

        let storage = build_storage(&config.storage).await?;
        let state = AppState::new(
            db.clone(),
            config.jwt_config(),
            storage,
            config.storage.max_file_size,
        );

        if opts.create_default_admin {
            let admin = &config.admin;
            match state
                .users
                .ensure_admin(&admin.email, &admin.full_name, &admin.password)
                .await
            {
                Ok(Some(user)) => {
                    info!(email = %user.email, "Bootstrap admin created");
                    warn!("Change the bootstrap admin password");
                }
                Ok(None) => {}
                Err(e) => error!(error = %e, "Failed to create bootstrap admin"),
            }
        }

        let router = create_api_router(state, prometheus);
        let addr = config.server.address();
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("HTTP server listening on http://{}", addr);
        info!("Swagger UI at http://{}/docs/", addr);

        let shutdown = ShutdownSignal::new();
        let stop = shutdown.clone();
        let server = axum::serve(listener, router).with_graceful_shutdown(async move {
            stop.wait().await;
            info!("HTTP server draining connections");
        });
        let api_task = tokio::spawn(async move {
            if let Err(e) = server.await {
                error!(error = %e, "HTTP server error");
            }
        });

        Ok(Self {
            config,
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// Spawn the SIGINT / SIGTERM listener that triggers shutdown
    pub fn install_signal_handler(&self) {
        tokio::spawn(crate::shared::listen_for_shutdown_signals(
            self.shutdown.clone(),
        ));
    }

    /// Wait for shutdown, give in-flight requests `shutdown_timeout` seconds,
    /// then close the database.
    pub async fn wait(self) {
        let Self {
            config,
            db,
            shutdown,
            mut api_task,
        } = self;

        tokio::select! {
            _ = shutdown.wait() => {}
            _ = &mut api_task => {
                warn!("HTTP server stopped without a shutdown signal");
            }
        }

        if !api_task.is_finished() {
            let grace = Duration::from_secs(config.server.shutdown_timeout);
            if tokio::time::timeout(grace, &mut api_task).await.is_err() {
                warn!(seconds = grace.as_secs(), "Shutdown timeout reached, aborting");
                api_task.abort();
            }
        }

        if let Err(e) = db.close().await {
            warn!(error = %e, "Error closing database connection");
        }
        info!("FixSync shutdown complete");
    }
}

/// Apply pending migrations and exit
pub async fn migrate(config: &AppConfig) -> Result<(), BoxError> {
    let db = init_database(&config.database_config()).await?;
    Migrator::up(&db, None).await?;
    info!("Migrations applied");
    db.close().await?;
    Ok(())
}

pub async fn build_storage(config: &StorageConfig) -> Result<Arc<dyn FileStorage>, BoxError> {
    let storage: Arc<dyn FileStorage> = match config.backend {
        StorageBackend::Local => {
            tokio::fs::create_dir_all(&config.local_dir).await?;
            info!(dir = %config.local_dir.display(), "Using local file storage");
            Arc::new(LocalFileStorage::new(
                config.local_dir.clone(),
                config.public_base_url.clone(),
            ))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory file storage; uploads are lost on restart");
            Arc::new(InMemoryFileStorage::new(config.public_base_url.clone()))
        }
    };
    Ok(storage)
}

/// The global recorder can be installed once per process; later calls reuse it.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();
    HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("Prometheus recorder installed");
                Some(handle)
            }
            Err(e) => {
                warn!(error = %e, "Prometheus recorder unavailable, /metrics disabled");
                None
            }
        })
        .clone()
}

/// Install the global subscriber. `RUST_LOG` overrides `[logging] level`.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.logging.format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };
    if let Err(e) = result {
        eprintln!("tracing already initialised: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;

    #[tokio::test]
    async fn memory_backend_needs_no_directory() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            local_dir: "/nonexistent/fixsync".into(),
            ..StorageConfig::default()
        };
        let storage = build_storage(&config).await.unwrap();
        assert_eq!(storage.url_for("general/a.png"), "/api/v1/media/files/general/a.png");
    }

    #[tokio::test]
    async fn local_backend_creates_its_root() {
        let dir = std::env::temp_dir().join(format!("fixsync-root-{}", uuid::Uuid::new_v4()));
        let config = StorageConfig {
            backend: StorageBackend::Local,
            local_dir: dir.clone(),
            ..StorageConfig::default()
        };
        build_storage(&config).await.unwrap();
        assert!(dir.is_dir());
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn start_serves_and_stops_on_signal() {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".into();
        config.server.port = 0;
        config.server.shutdown_timeout = 1;
        config.database.url = "sqlite::memory:".into();
        config.database.max_connections = 1;
        config.storage.backend = StorageBackend::Memory;

        let handle = ServerHandle::start(ServerOptions {
            config,
            ..ServerOptions::default()
        })
        .await
        .unwrap();
        handle.shutdown_signal().trigger();
        tokio::time::timeout(Duration::from_secs(5), handle.wait())
            .await
            .unwrap();
    }
}
