//! Health check handler

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use utoipa::ToSchema;

/// Handles the probe needs: a connection to ping and the boot instant
#[derive(Clone)]
pub struct HealthState {
    pub db: DatabaseConnection,
    pub started_at: Arc<Instant>,
}

impl HealthState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            started_at: Arc::new(Instant::now()),
        }
    }

    /// Round-trip time of `SELECT 1`, or `None` when the database is unreachable
    async fn ping(&self) -> Option<u64> {
        let started = Instant::now();
        let stmt = Statement::from_string(self.db.get_database_backend(), "SELECT 1".to_string());
        match self.db.execute(stmt).await {
            Ok(_) => Some(started.elapsed().as_millis() as u64),
            Err(e) => {
                tracing::warn!(error = %e, "Health check database ping failed");
                None
            }
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `ok` or `degraded`
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseHealth {
    pub reachable: bool,
    pub latency_ms: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service and database are up", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let latency_ms = state.ping().await;
    let reachable = latency_ms.is_some();

    let (code, status) = if reachable {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.started_at.elapsed().as_secs(),
            database: DatabaseHealth {
                reachable,
                latency_ms,
            },
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_support::memory_db;

    #[tokio::test]
    async fn reports_ok_with_live_database() {
        let state = HealthState::new(memory_db().await);
        let (code, Json(body)) = health_check(State(state)).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body.status, "ok");
        assert!(body.database.reachable);
    }

    #[tokio::test]
    async fn reports_degraded_after_connection_closed() {
        let db = memory_db().await;
        let state = HealthState::new(db.clone());
        db.close().await.unwrap();

        let (code, Json(body)) = health_check(State(state)).await;
        assert_eq!(code, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "degraded");
        assert!(body.database.latency_ms.is_none());
    }
}
