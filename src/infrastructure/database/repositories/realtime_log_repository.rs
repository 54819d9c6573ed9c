use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::db_err;
use crate::domain::realtime_log::RealtimeLogRepository;
use crate::domain::{ActionType, DomainResult, NewRealtimeLog, RealtimeLog};
use crate::infrastructure::database::entities::realtime_log;

/// Append-only store; there is no update or delete path.
pub struct SeaOrmRealtimeLogRepository {
    db: DatabaseConnection,
}

impl SeaOrmRealtimeLogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn action_to_entity(action: ActionType) -> realtime_log::ActionType {
    match action {
        ActionType::Created => realtime_log::ActionType::Created,
        ActionType::Updated => realtime_log::ActionType::Updated,
        ActionType::StatusChanged => realtime_log::ActionType::StatusChanged,
        ActionType::Assigned => realtime_log::ActionType::Assigned,
    }
}

fn action_to_domain(action: realtime_log::ActionType) -> ActionType {
    match action {
        realtime_log::ActionType::Created => ActionType::Created,
        realtime_log::ActionType::Updated => ActionType::Updated,
        realtime_log::ActionType::StatusChanged => ActionType::StatusChanged,
        realtime_log::ActionType::Assigned => ActionType::Assigned,
    }
}

fn model_to_domain(m: realtime_log::Model) -> RealtimeLog {
    RealtimeLog {
        id: m.id,
        device_id: m.device_id,
        action: action_to_domain(m.action),
        detail: m.detail,
        created_by: m.created_by,
        created_at: m.created_at,
    }
}

/// Active model for a new log row, shared with the device repository so
/// device writes can append inside their own database transaction.
pub(super) fn new_log_model(device_id: i32, log: NewRealtimeLog) -> realtime_log::ActiveModel {
    realtime_log::ActiveModel {
        device_id: Set(device_id),
        action: Set(action_to_entity(log.action)),
        detail: Set(log.detail),
        created_by: Set(log.created_by),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
}

#[async_trait]
impl RealtimeLogRepository for SeaOrmRealtimeLogRepository {
    async fn append(&self, device_id: i32, log: NewRealtimeLog) -> DomainResult<RealtimeLog> {
        let inserted = new_log_model(device_id, log)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn find_by_device(
        &self,
        device_id: i32,
        action: Option<ActionType>,
    ) -> DomainResult<Vec<RealtimeLog>> {
        let mut query =
            realtime_log::Entity::find().filter(realtime_log::Column::DeviceId.eq(device_id));

        if let Some(action) = action {
            query = query.filter(realtime_log::Column::Action.eq(action_to_entity(action)));
        }

        let models = query
            .order_by_desc(realtime_log::Column::CreatedAt)
            .order_by_desc(realtime_log::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
