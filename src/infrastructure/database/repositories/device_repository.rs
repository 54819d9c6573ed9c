use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use super::db_err;
use super::realtime_log_repository::new_log_model;
use crate::domain::device::DeviceRepository;
use crate::domain::{Device, DeviceStatus, DomainError, DomainResult, NewRealtimeLog};
use crate::infrastructure::database::entities::{
    device, realtime_log, repair_item, repair_session, transaction, warranty,
};
use crate::shared::{PageRequest, PaginatedResult};

pub struct SeaOrmDeviceRepository {
    db: DatabaseConnection,
}

impl SeaOrmDeviceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(super) fn status_to_entity(status: DeviceStatus) -> device::DeviceStatus {
    match status {
        DeviceStatus::Received => device::DeviceStatus::Received,
        DeviceStatus::Inspecting => device::DeviceStatus::Inspecting,
        DeviceStatus::WaitingParts => device::DeviceStatus::WaitingParts,
        DeviceStatus::Repairing => device::DeviceStatus::Repairing,
        DeviceStatus::Completed => device::DeviceStatus::Completed,
        DeviceStatus::Returned => device::DeviceStatus::Returned,
    }
}

pub(super) fn status_to_domain(status: device::DeviceStatus) -> DeviceStatus {
    match status {
        device::DeviceStatus::Received => DeviceStatus::Received,
        device::DeviceStatus::Inspecting => DeviceStatus::Inspecting,
        device::DeviceStatus::WaitingParts => DeviceStatus::WaitingParts,
        device::DeviceStatus::Repairing => DeviceStatus::Repairing,
        device::DeviceStatus::Completed => DeviceStatus::Completed,
        device::DeviceStatus::Returned => DeviceStatus::Returned,
    }
}

fn model_to_domain(m: device::Model) -> Device {
    Device {
        id: m.id,
        customer_id: m.customer_id,
        brand_id: m.brand_id,
        model_id: m.model_id,
        device_type: m.device_type,
        imei: m.imei,
        color: m.color,
        status: status_to_domain(m.status),
        received_date: m.received_date,
        expected_return_date: m.expected_return_date,
        note: m.note,
        created_by: m.created_by,
        assigned_to: m.assigned_to,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl DeviceRepository for SeaOrmDeviceRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Device>> {
        let model = device::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list(&self, page: PageRequest) -> DomainResult<PaginatedResult<Device>> {
        let paginator = device::Entity::find()
            .order_by_desc(device::Column::ReceivedDate)
            .order_by_desc(device::Column::Id)
            .paginate(&self.db, page.limit as u64);

        let total = paginator.num_items().await.map_err(db_err)?;
        let models = paginator.fetch_page(page.index()).await.map_err(db_err)?;

        let items = models.into_iter().map(model_to_domain).collect();
        Ok(PaginatedResult::new(items, total, page.page, page.limit))
    }

    async fn create(&self, d: Device, log: NewRealtimeLog) -> DomainResult<Device> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let model = device::ActiveModel {
            customer_id: Set(d.customer_id),
            brand_id: Set(d.brand_id),
            model_id: Set(d.model_id),
            device_type: Set(d.device_type),
            imei: Set(d.imei),
            color: Set(d.color),
            status: Set(status_to_entity(d.status)),
            received_date: Set(d.received_date),
            expected_return_date: Set(d.expected_return_date),
            note: Set(d.note),
            created_by: Set(d.created_by),
            assigned_to: Set(d.assigned_to),
            created_at: Set(d.created_at),
            updated_at: Set(d.updated_at),
            ..Default::default()
        };

        let inserted = model.insert(&txn).await.map_err(db_err)?;
        new_log_model(inserted.id, log)
            .insert(&txn)
            .await
            .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn update(&self, d: Device, logs: Vec<NewRealtimeLog>) -> DomainResult<Device> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let existing = device::Entity::find_by_id(d.id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Device", "id", d.id))?;

        let mut active: device::ActiveModel = existing.into();
        active.customer_id = Set(d.customer_id);
        active.brand_id = Set(d.brand_id);
        active.model_id = Set(d.model_id);
        active.device_type = Set(d.device_type);
        active.imei = Set(d.imei);
        active.color = Set(d.color);
        active.status = Set(status_to_entity(d.status));
        active.received_date = Set(d.received_date);
        active.expected_return_date = Set(d.expected_return_date);
        active.note = Set(d.note);
        active.assigned_to = Set(d.assigned_to);
        active.updated_at = Set(Utc::now());

        let updated = active.update(&txn).await.map_err(db_err)?;
        for log in logs {
            new_log_model(updated.id, log)
                .insert(&txn)
                .await
                .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;
        Ok(model_to_domain(updated))
    }

    async fn delete_cascade(&self, id: i32) -> DomainResult<()> {
        let txn = self.db.begin().await.map_err(db_err)?;

        if device::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .is_none()
        {
            return Err(DomainError::not_found("Device", "id", id));
        }

        let logs = realtime_log::Entity::delete_many()
            .filter(realtime_log::Column::DeviceId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        let warranties = warranty::Entity::delete_many()
            .filter(warranty::Column::DeviceId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        let transactions = transaction::Entity::delete_many()
            .filter(transaction::Column::DeviceId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        let items = repair_item::Entity::delete_many()
            .filter(repair_item::Column::DeviceId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        let sessions = repair_session::Entity::delete_many()
            .filter(repair_session::Column::DeviceId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        device::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        debug!(
            device_id = id,
            logs = logs.rows_affected,
            warranties = warranties.rows_affected,
            transactions = transactions.rows_affected,
            repair_items = items.rows_affected,
            repair_sessions = sessions.rows_affected,
            "Device deleted with dependents"
        );
        Ok(())
    }
}
