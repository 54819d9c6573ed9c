//! Device intake, workflow changes and the billing aggregate

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use super::{clean, require_device, require_user};
use crate::domain::{
    ActionType, Device, DeviceBalance, DeviceModel, DeviceStatus, DomainError, DomainResult,
    NewRealtimeLog, RepairItem, RepositoryProvider, Transaction,
};
use crate::shared::{PageRequest, PaginatedResult};

#[derive(Debug, Clone, Default)]
pub struct CreateDevice {
    pub customer_id: Option<i32>,
    pub brand_id: i32,
    pub model_id: i32,
    pub imei: Option<String>,
    pub color: Option<String>,
    pub status: Option<DeviceStatus>,
    pub received_date: Option<DateTime<Utc>>,
    pub expected_return_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub assigned_to: Option<String>,
}

/// Partial update; `None` leaves the field unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateDevice {
    pub customer_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub model_id: Option<i32>,
    pub imei: Option<String>,
    pub color: Option<String>,
    pub status: Option<DeviceStatus>,
    pub expected_return_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub assigned_to: Option<String>,
}

/// Device plus the billing figures derived from its children
#[derive(Debug, Clone)]
pub struct DeviceDetails {
    pub device: Device,
    pub repair_items: Vec<RepairItem>,
    pub latest_transaction: Option<Transaction>,
    pub balance: DeviceBalance,
}

pub struct DeviceService {
    repos: Arc<dyn RepositoryProvider>,
}

impl DeviceService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Writes ──────────────────────────────────────────────────

    pub async fn create(&self, actor_id: &str, input: CreateDevice) -> DomainResult<DeviceDetails> {
        require_user(self.repos.as_ref(), actor_id).await?;
        if let Some(customer_id) = input.customer_id {
            self.require_customer(customer_id).await?;
        }
        let model = self.require_model(input.brand_id, input.model_id).await?;
        let assigned_to = self.resolve_assignee(input.assigned_to).await?;

        let mut device = Device::new(input.brand_id, input.model_id, actor_id);
        device.customer_id = input.customer_id;
        device.device_type = Device::resolve_device_type(Some(&model.device_type));
        device.imei = clean(input.imei);
        device.color = clean(input.color);
        device.status = input.status.unwrap_or_default();
        if let Some(received) = input.received_date {
            device.received_date = received;
        }
        device.expected_return_date = input.expected_return_date;
        device.note = clean(input.note);
        device.assigned_to = assigned_to;

        let log = NewRealtimeLog::new(
            ActionType::Created,
            format!("Device received with status {}", device.status),
            actor_id,
        );
        let device = self.repos.devices().create(device, log).await?;

        info!(device_id = device.id, created_by = %actor_id, "Device created");
        self.details(device).await
    }

    /// Applies the changes and appends one log entry per kind of change:
    /// STATUS_CHANGED, ASSIGNED, and UPDATED for anything else.
    pub async fn update(
        &self,
        actor_id: &str,
        id: i32,
        input: UpdateDevice,
    ) -> DomainResult<DeviceDetails> {
        require_user(self.repos.as_ref(), actor_id).await?;
        let mut device = require_device(self.repos.as_ref(), id).await?;
        let mut logs = Vec::new();
        let mut other_changes = Vec::new();

        if let Some(customer_id) = input.customer_id {
            self.require_customer(customer_id).await?;
            if device.customer_id != Some(customer_id) {
                device.customer_id = Some(customer_id);
                other_changes.push("customer");
            }
        }

        if input.brand_id.is_some() || input.model_id.is_some() {
            let brand_id = input.brand_id.unwrap_or(device.brand_id);
            let model_id = input.model_id.unwrap_or(device.model_id);
            let model = self.require_model(brand_id, model_id).await?;
            if brand_id != device.brand_id || model_id != device.model_id {
                device.brand_id = brand_id;
                device.model_id = model_id;
                device.device_type = Device::resolve_device_type(Some(&model.device_type));
                other_changes.push("model");
            }
        }

        if let Some(imei) = input.imei {
            device.imei = clean(Some(imei));
            other_changes.push("imei");
        }
        if let Some(color) = input.color {
            device.color = clean(Some(color));
            other_changes.push("color");
        }
        if let Some(expected) = input.expected_return_date {
            device.expected_return_date = Some(expected);
            other_changes.push("expectedReturnDate");
        }
        if let Some(note) = input.note {
            device.note = clean(Some(note));
            other_changes.push("note");
        }

        if let Some(status) = input.status {
            if status != device.status {
                logs.push(status_log(&device, status, actor_id));
                device.status = status;
            }
        }

        if input.assigned_to.is_some() {
            let assignee = self.resolve_assignee(input.assigned_to).await?;
            if assignee != device.assigned_to {
                logs.push(assign_log(assignee.as_deref(), actor_id));
                device.assigned_to = assignee;
            }
        }

        if !other_changes.is_empty() {
            logs.push(NewRealtimeLog::new(
                ActionType::Updated,
                format!("Updated {}", other_changes.join(", ")),
                actor_id,
            ));
        }

        let device = self.repos.devices().update(device, logs).await?;
        info!(device_id = id, updated_by = %actor_id, "Device updated");
        self.details(device).await
    }

    pub async fn change_status(
        &self,
        actor_id: &str,
        id: i32,
        status: DeviceStatus,
    ) -> DomainResult<DeviceDetails> {
        require_user(self.repos.as_ref(), actor_id).await?;
        let mut device = require_device(self.repos.as_ref(), id).await?;
        if device.status == status {
            return self.details(device).await;
        }

        let log = status_log(&device, status, actor_id);
        device.status = status;
        let device = self.repos.devices().update(device, vec![log]).await?;

        info!(device_id = id, status = %status, "Device status changed");
        self.details(device).await
    }

    /// `None` clears the assignment
    pub async fn assign(
        &self,
        actor_id: &str,
        id: i32,
        assignee: Option<String>,
    ) -> DomainResult<DeviceDetails> {
        require_user(self.repos.as_ref(), actor_id).await?;
        let mut device = require_device(self.repos.as_ref(), id).await?;
        let assignee = self.resolve_assignee(assignee).await?;
        if assignee == device.assigned_to {
            return self.details(device).await;
        }

        let log = assign_log(assignee.as_deref(), actor_id);
        device.assigned_to = assignee;
        let device = self.repos.devices().update(device, vec![log]).await?;

        info!(device_id = id, assigned_to = ?device.assigned_to, "Device assignment changed");
        self.details(device).await
    }

    /// Hard delete; sessions, items, payments, warranties and logs go with it.
    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.repos.devices().delete_cascade(id).await?;
        info!(device_id = id, "Device deleted");
        Ok(())
    }

    // ── Reads ───────────────────────────────────────────────────

    pub async fn get(&self, id: i32) -> DomainResult<DeviceDetails> {
        let device = require_device(self.repos.as_ref(), id).await?;
        self.details(device).await
    }

    pub async fn list(&self, page: PageRequest) -> DomainResult<PaginatedResult<DeviceDetails>> {
        let devices = self.repos.devices().list(page).await?;
        let mut items = Vec::with_capacity(devices.items.len());
        for device in devices.items {
            items.push(self.details(device).await?);
        }
        Ok(PaginatedResult::new(
            items,
            devices.total,
            devices.page,
            devices.limit,
        ))
    }

    /// Recomputed on every call
    async fn details(&self, device: Device) -> DomainResult<DeviceDetails> {
        let repair_items = self.repos.repair_items().find_by_device(device.id).await?;
        let latest_transaction = self
            .repos
            .transactions()
            .find_latest_for_device(device.id)
            .await?;
        let balance = DeviceBalance::compute(&repair_items, latest_transaction.as_ref());

        Ok(DeviceDetails {
            device,
            repair_items,
            latest_transaction,
            balance,
        })
    }

    // ── Reference checks ────────────────────────────────────────

    async fn require_customer(&self, customer_id: i32) -> DomainResult<()> {
        self.repos
            .customers()
            .find_by_id(customer_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Customer", "id", customer_id))
    }

    async fn require_model(&self, brand_id: i32, model_id: i32) -> DomainResult<DeviceModel> {
        self.repos
            .brands()
            .find_by_id(brand_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Brand", "id", brand_id))?;
        let model = self
            .repos
            .device_models()
            .find_by_id(model_id)
            .await?
            .ok_or_else(|| DomainError::not_found("DeviceModel", "id", model_id))?;
        if model.brand_id != brand_id {
            return Err(DomainError::Validation(format!(
                "Model {} does not belong to brand {}",
                model_id, brand_id
            )));
        }
        Ok(model)
    }

    /// Blank clears; anything else must be an existing user.
    async fn resolve_assignee(&self, assignee: Option<String>) -> DomainResult<Option<String>> {
        match clean(assignee) {
            Some(user_id) => {
                require_user(self.repos.as_ref(), &user_id).await?;
                Ok(Some(user_id))
            }
            None => Ok(None),
        }
    }
}

fn status_log(device: &Device, to: DeviceStatus, actor_id: &str) -> NewRealtimeLog {
    NewRealtimeLog::new(
        ActionType::StatusChanged,
        format!("Status changed from {} to {}", device.status, to),
        actor_id,
    )
}

fn assign_log(assignee: Option<&str>, actor_id: &str) -> NewRealtimeLog {
    let detail = match assignee {
        Some(user_id) => format!("Assigned to {}", user_id),
        None => "Assignment cleared".to_string(),
    };
    NewRealtimeLog::new(ActionType::Assigned, detail, actor_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PaymentMethod, RepairSession, UserRole, Warranty};
    use crate::infrastructure::database::test_support::{
        memory_repos, seed_brand_and_model, seed_device, seed_user,
    };

    fn create_input(brand_id: i32, model_id: i32) -> CreateDevice {
        CreateDevice {
            brand_id,
            model_id,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_copies_model_type_and_logs_creation() {
        let repos = memory_repos().await;
        let staff = seed_user(repos.as_ref(), "tech@shop.vn", UserRole::Technician).await;
        let (brand, model) = seed_brand_and_model(repos.as_ref(), "LAPTOP").await;
        let svc = DeviceService::new(repos.clone());

        let details = svc
            .create(&staff.id, create_input(brand.id, model.id))
            .await
            .unwrap();
        assert_eq!(details.device.device_type, "LAPTOP");
        assert_eq!(details.device.status, DeviceStatus::Received);
        assert_eq!(details.device.created_by, staff.id);

        let logs = repos
            .realtime_logs()
            .find_by_device(details.device.id, None)
            .await
            .unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].action, ActionType::Created);
        assert_eq!(logs[0].created_by, staff.id);
    }

    #[tokio::test]
    async fn model_from_another_brand_is_rejected() {
        let repos = memory_repos().await;
        let staff = seed_user(repos.as_ref(), "a@shop.vn", UserRole::Admin).await;
        let (brand, _) = seed_brand_and_model(repos.as_ref(), "PHONE").await;
        let (_, other_model) = seed_brand_and_model(repos.as_ref(), "PHONE").await;
        let svc = DeviceService::new(repos);

        let err = svc
            .create(&staff.id, create_input(brand.id, other_model.id))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_customer_and_actor_are_not_found() {
        let repos = memory_repos().await;
        let staff = seed_user(repos.as_ref(), "a@shop.vn", UserRole::Admin).await;
        let (brand, model) = seed_brand_and_model(repos.as_ref(), "PHONE").await;
        let svc = DeviceService::new(repos);

        let mut input = create_input(brand.id, model.id);
        input.customer_id = Some(404);
        let err = svc.create(&staff.id, input).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Customer", .. }));

        let err = svc
            .create("ghost", create_input(brand.id, model.id))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "User", .. }));
    }

    #[tokio::test]
    async fn update_appends_one_log_per_kind_of_change() {
        let repos = memory_repos().await;
        let staff = seed_user(repos.as_ref(), "a@shop.vn", UserRole::Admin).await;
        let tech = seed_user(repos.as_ref(), "t@shop.vn", UserRole::Technician).await;
        let device = seed_device(repos.as_ref(), &staff.id).await;
        let svc = DeviceService::new(repos.clone());

        let update = UpdateDevice {
            status: Some(DeviceStatus::Repairing),
            assigned_to: Some(tech.id.clone()),
            color: Some("Black".into()),
            ..Default::default()
        };
        let details = svc.update(&staff.id, device.id, update).await.unwrap();
        assert_eq!(details.device.status, DeviceStatus::Repairing);
        assert_eq!(details.device.assigned_to.as_deref(), Some(tech.id.as_str()));

        let logs = repos
            .realtime_logs()
            .find_by_device(device.id, None)
            .await
            .unwrap();
        let actions: Vec<_> = logs.iter().map(|l| l.action).collect();
        assert_eq!(logs.len(), 4);
        assert!(actions.contains(&ActionType::StatusChanged));
        assert!(actions.contains(&ActionType::Assigned));
        assert!(actions.contains(&ActionType::Updated));
        assert!(logs.iter().all(|l| l.created_by == staff.id));
    }

    #[tokio::test]
    async fn unchanged_status_writes_no_log() {
        let repos = memory_repos().await;
        let staff = seed_user(repos.as_ref(), "a@shop.vn", UserRole::Admin).await;
        let device = seed_device(repos.as_ref(), &staff.id).await;
        let svc = DeviceService::new(repos.clone());

        svc.change_status(&staff.id, device.id, DeviceStatus::Received)
            .await
            .unwrap();
        let logs = repos
            .realtime_logs()
            .find_by_device(device.id, Some(ActionType::StatusChanged))
            .await
            .unwrap();
        assert!(logs.is_empty());
    }

    #[tokio::test]
    async fn assigning_unknown_user_fails() {
        let repos = memory_repos().await;
        let staff = seed_user(repos.as_ref(), "a@shop.vn", UserRole::Admin).await;
        let device = seed_device(repos.as_ref(), &staff.id).await;
        let svc = DeviceService::new(repos);

        let err = svc
            .assign(&staff.id, device.id, Some("nobody".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "User", .. }));
    }

    #[tokio::test]
    async fn balance_uses_item_costs_and_latest_payment() {
        let repos = memory_repos().await;
        let staff = seed_user(repos.as_ref(), "a@shop.vn", UserRole::Admin).await;
        let device = seed_device(repos.as_ref(), &staff.id).await;
        for cost in [Some(100_000), Some(250_000), None] {
            let mut item = RepairItem::new(device.id, "Work");
            item.cost = cost;
            repos.repair_items().save(item).await.unwrap();
        }
        let svc = DeviceService::new(repos.clone());

        let details = svc.get(device.id).await.unwrap();
        assert_eq!(details.balance.repair_subtotal, 350_000);
        assert_eq!(details.balance.outstanding_amount, 350_000);
        assert!(details.latest_transaction.is_none());

        let mut tx = Transaction::new(device.id, 200_000, 0, PaymentMethod::Cash);
        tx.settle().unwrap();
        repos.transactions().save(tx).await.unwrap();

        let details = svc.get(device.id).await.unwrap();
        assert_eq!(details.repair_items.len(), 3);
        assert_eq!(details.balance.repair_subtotal, 350_000);
        assert_eq!(details.balance.outstanding_amount, 150_000);
    }

    #[tokio::test]
    async fn delete_cascades_to_every_child() {
        let repos = memory_repos().await;
        let staff = seed_user(repos.as_ref(), "a@shop.vn", UserRole::Admin).await;
        let device = seed_device(repos.as_ref(), &staff.id).await;

        let session = repos
            .repair_sessions()
            .save(RepairSession::new(device.id, staff.id.clone()))
            .await
            .unwrap();
        let mut item = RepairItem::new(device.id, "Screen");
        item.cost = Some(10);
        item.repair_session_id = Some(session.id);
        let item = repos.repair_items().save(item).await.unwrap();
        let mut tx = Transaction::new(device.id, 10, 0, PaymentMethod::Card);
        tx.settle().unwrap();
        let tx = repos.transactions().save(tx).await.unwrap();
        let start = Utc::now();
        let warranty = repos
            .warranties()
            .save(Warranty {
                id: 0,
                device_id: device.id,
                repair_session_id: session.id,
                repair_item_id: Some(item.id),
                warranty_months: 3,
                start_date: start,
                end_date: crate::domain::warranty::coverage_end(start, 3).unwrap(),
                warranty_code: "BH0000ABCD".into(),
                created_at: start,
                updated_at: start,
            })
            .await
            .unwrap();

        let svc = DeviceService::new(repos.clone());
        svc.delete(device.id).await.unwrap();

        assert!(repos.devices().find_by_id(device.id).await.unwrap().is_none());
        assert!(repos.repair_sessions().find_by_id(session.id).await.unwrap().is_none());
        assert!(repos.repair_items().find_by_id(item.id).await.unwrap().is_none());
        assert!(repos.transactions().find_by_id(tx.id).await.unwrap().is_none());
        assert!(repos.warranties().find_by_id(warranty.id).await.unwrap().is_none());
        assert!(repos
            .realtime_logs()
            .find_by_device(device.id, None)
            .await
            .unwrap()
            .is_empty());

        assert!(matches!(svc.delete(device.id).await, Err(DomainError::NotFound { .. })));
    }
}
