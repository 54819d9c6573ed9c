//! Warranty issuance and coverage queries

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::{require_device, resolve_session};
use crate::domain::warranty::{coverage_end, generate_warranty_code};
use crate::domain::{DomainError, DomainResult, RepositoryProvider, Warranty};

#[derive(Debug, Clone, Default)]
pub struct CreateWarranty {
    pub device_id: i32,
    pub repair_session_id: Option<i32>,
    /// `None` covers the whole device
    pub repair_item_id: Option<i32>,
    pub warranty_months: i32,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateWarranty {
    pub warranty_months: Option<i32>,
    pub repair_item_id: Option<i32>,
}

pub struct WarrantyService {
    repos: Arc<dyn RepositoryProvider>,
}

impl WarrantyService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create(&self, input: CreateWarranty) -> DomainResult<Warranty> {
        if input.warranty_months <= 0 {
            return Err(DomainError::Validation(
                "warrantyMonths must be greater than 0".into(),
            ));
        }
        require_device(self.repos.as_ref(), input.device_id).await?;
        self.check_item(input.device_id, input.repair_item_id).await?;

        let session = resolve_session(self.repos.as_ref(), input.device_id, input.repair_session_id)
            .await?
            .ok_or_else(|| DomainError::not_found("RepairSession", "deviceId", input.device_id))?;

        let start_date = Utc::now();
        let end_date = coverage_end(start_date, input.warranty_months)?;
        let warranty_code = self.unused_code().await?;

        let warranty = Warranty {
            id: 0,
            device_id: input.device_id,
            repair_session_id: session.id,
            repair_item_id: input.repair_item_id,
            warranty_months: input.warranty_months,
            start_date,
            end_date,
            warranty_code,
            created_at: start_date,
            updated_at: start_date,
        };
        let warranty = self.repos.warranties().save(warranty).await?;

        info!(
            warranty_id = warranty.id,
            device_id = warranty.device_id,
            code = %warranty.warranty_code,
            end_date = %warranty.end_date,
            "Warranty issued"
        );
        Ok(warranty)
    }

    /// The end date is always recomputed from the original start date.
    pub async fn update(&self, id: i32, input: UpdateWarranty) -> DomainResult<Warranty> {
        let mut warranty = self.get(id).await?;

        if let Some(months) = input.warranty_months {
            warranty.end_date = coverage_end(warranty.start_date, months)?;
            warranty.warranty_months = months;
        }
        if input.repair_item_id.is_some() {
            self.check_item(warranty.device_id, input.repair_item_id)
                .await?;
            warranty.repair_item_id = input.repair_item_id;
        }

        self.repos.warranties().update(warranty).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Warranty> {
        self.repos
            .warranties()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Warranty", "id", id))
    }

    pub async fn get_by_code(&self, code: &str) -> DomainResult<Warranty> {
        let code = code.trim().to_ascii_uppercase();
        self.repos
            .warranties()
            .find_by_code(&code)
            .await?
            .ok_or_else(|| DomainError::not_found("Warranty", "warrantyCode", code))
    }

    pub async fn list_by_device(&self, device_id: i32) -> DomainResult<Vec<Warranty>> {
        require_device(self.repos.as_ref(), device_id).await?;
        self.repos.warranties().find_by_device(device_id).await
    }

    /// Warranties whose end date falls inside `[start, end]`
    pub async fn expiring_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DomainResult<Vec<Warranty>> {
        if end < start {
            return Err(DomainError::Validation(
                "end must not be before start".into(),
            ));
        }
        self.repos
            .warranties()
            .find_expiring_between(start, end)
            .await
    }

    pub async fn expired(&self) -> DomainResult<Vec<Warranty>> {
        self.repos.warranties().find_expired(Utc::now()).await
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.repos.warranties().delete(id).await?;
        info!(warranty_id = id, "Warranty deleted");
        Ok(())
    }

    async fn check_item(&self, device_id: i32, item_id: Option<i32>) -> DomainResult<()> {
        let Some(item_id) = item_id else {
            return Ok(());
        };
        let item = self
            .repos
            .repair_items()
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| DomainError::not_found("RepairItem", "id", item_id))?;
        if item.device_id != device_id {
            return Err(DomainError::Validation(format!(
                "Repair item {} does not belong to device {}",
                item_id, device_id
            )));
        }
        Ok(())
    }

    /// Draws codes until one is not taken. No retry cap.
    async fn unused_code(&self) -> DomainResult<String> {
        loop {
            let code = generate_warranty_code();
            if self.repos.warranties().find_by_code(&code).await?.is_none() {
                return Ok(code);
            }
            debug!(code = %code, "Warranty code collision, drawing again");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::domain::warranty::is_valid_warranty_code;
    use crate::domain::{Device, RepairItem, RepairSession, UserRole};
    use crate::infrastructure::database::test_support::{memory_repos, seed_device, seed_user};

    async fn device_with_session(repos: &dyn RepositoryProvider) -> (Device, RepairSession) {
        let staff = seed_user(repos, &format!("{}@shop.vn", uuid::Uuid::new_v4()), UserRole::Technician).await;
        let device = seed_device(repos, &staff.id).await;
        let session = repos
            .repair_sessions()
            .save(RepairSession::new(device.id, staff.id))
            .await
            .unwrap();
        (device, session)
    }

    fn input(device_id: i32, months: i32) -> CreateWarranty {
        CreateWarranty {
            device_id,
            warranty_months: months,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn issues_code_and_calendar_end_date() {
        let repos = memory_repos().await;
        let (device, session) = device_with_session(repos.as_ref()).await;
        let svc = WarrantyService::new(repos);

        let warranty = svc.create(input(device.id, 6)).await.unwrap();
        assert!(is_valid_warranty_code(&warranty.warranty_code));
        assert_eq!(warranty.repair_session_id, session.id);
        assert_eq!(
            warranty.end_date,
            coverage_end(warranty.start_date, 6).unwrap()
        );

        let found = svc.get_by_code(&warranty.warranty_code.to_lowercase()).await.unwrap();
        assert_eq!(found.id, warranty.id);
    }

    #[tokio::test]
    async fn codes_are_unique() {
        let repos = memory_repos().await;
        let (device, _) = device_with_session(repos.as_ref()).await;
        let svc = WarrantyService::new(repos);

        let mut codes = HashSet::new();
        for _ in 0..20 {
            let w = svc.create(input(device.id, 1)).await.unwrap();
            assert!(codes.insert(w.warranty_code));
        }
    }

    #[tokio::test]
    async fn device_without_session_is_rejected() {
        let repos = memory_repos().await;
        let staff = seed_user(repos.as_ref(), "t@shop.vn", UserRole::Technician).await;
        let device = seed_device(repos.as_ref(), &staff.id).await;
        let svc = WarrantyService::new(repos);

        let err = svc.create(input(device.id, 3)).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound { entity: "RepairSession", field: "deviceId", .. }
        ));
    }

    #[tokio::test]
    async fn zero_months_and_foreign_item_are_rejected() {
        let repos = memory_repos().await;
        let (device, _) = device_with_session(repos.as_ref()).await;
        let (other, _) = device_with_session(repos.as_ref()).await;
        let mut item = RepairItem::new(other.id, "Screen");
        item.cost = Some(1);
        let item = repos.repair_items().save(item).await.unwrap();
        let svc = WarrantyService::new(repos);

        assert!(matches!(
            svc.create(input(device.id, 0)).await,
            Err(DomainError::Validation(_))
        ));
        let err = svc
            .create(CreateWarranty {
                repair_item_id: Some(item.id),
                ..input(device.id, 3)
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn update_recomputes_from_original_start() {
        let repos = memory_repos().await;
        let (device, _) = device_with_session(repos.as_ref()).await;
        let svc = WarrantyService::new(repos);

        let warranty = svc.create(input(device.id, 3)).await.unwrap();
        let updated = svc
            .update(
                warranty.id,
                UpdateWarranty {
                    warranty_months: Some(12),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.start_date, warranty.start_date);
        assert_eq!(updated.warranty_code, warranty.warranty_code);
        assert_eq!(updated.end_date, coverage_end(warranty.start_date, 12).unwrap());
    }

    #[tokio::test]
    async fn expiry_queries() {
        let repos = memory_repos().await;
        let (device, _) = device_with_session(repos.as_ref()).await;
        let svc = WarrantyService::new(repos);

        let w = svc.create(input(device.id, 1)).await.unwrap();
        let soon = svc
            .expiring_between(Utc::now(), Utc::now() + chrono::Duration::days(40))
            .await
            .unwrap();
        assert_eq!(soon.len(), 1);
        assert_eq!(soon[0].id, w.id);
        assert!(svc.expired().await.unwrap().is_empty());
    }
}
