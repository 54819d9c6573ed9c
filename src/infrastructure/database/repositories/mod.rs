//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod brand_repository;
pub mod customer_repository;
pub mod device_model_repository;
pub mod device_repository;
pub mod media_repository;
pub mod realtime_log_repository;
pub mod repair_item_repository;
pub mod repair_session_repository;
pub mod repository_provider;
pub mod service_catalog_repository;
pub mod transaction_repository;
pub mod user_repository;
pub mod warranty_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{ColumnTrait, DbErr};

use crate::domain::DomainError;

fn db_err(e: DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

/// Maps unique-constraint violations to `Conflict`, everything else to `Storage`
fn write_err(what: &str) -> impl Fn(DbErr) -> DomainError + '_ {
    move |e| {
        let msg = e.to_string();
        if msg.contains("UNIQUE") || msg.contains("duplicate") {
            DomainError::Conflict(what.to_string())
        } else {
            db_err(e)
        }
    }
}

/// `LOWER(col) = lower(value)`
fn eq_ignore_case<C: ColumnTrait>(col: C, value: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(col))).eq(value.to_lowercase())
}
