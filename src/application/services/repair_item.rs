//! Repair item ledger with service catalog defaulting

use std::sync::Arc;

use tracing::info;

use super::{require_device, resolve_session};
use crate::domain::{
    DomainError, DomainResult, RepairItem, RepairItemDraft, RepositoryProvider, ServiceCatalog,
};

#[derive(Debug, Clone, Default)]
pub struct RepairItemInput {
    pub device_id: i32,
    pub repair_session_id: Option<i32>,
    pub service_catalog_id: Option<i32>,
    pub service_name: Option<String>,
    pub part_used: Option<String>,
    pub cost: Option<i64>,
    pub warranty_months: Option<i32>,
    pub description: Option<String>,
}

impl RepairItemInput {
    fn draft(&self) -> RepairItemDraft {
        RepairItemDraft {
            service_name: self.service_name.clone(),
            part_used: self.part_used.clone(),
            cost: self.cost,
            warranty_months: self.warranty_months,
            description: self.description.clone(),
        }
    }
}

pub struct RepairItemService {
    repos: Arc<dyn RepositoryProvider>,
}

impl RepairItemService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create(&self, input: RepairItemInput) -> DomainResult<RepairItem> {
        require_device(self.repos.as_ref(), input.device_id).await?;
        let session =
            resolve_session(self.repos.as_ref(), input.device_id, input.repair_session_id).await?;

        let mut draft = input.draft();
        if let Some(catalog_id) = input.service_catalog_id {
            draft = draft.apply_catalog(&self.require_catalog(catalog_id).await?);
        }

        let mut item = RepairItem::new(input.device_id, "");
        item.repair_session_id = session.map(|s| s.id);
        item.service_catalog_id = input.service_catalog_id;
        draft.fill(&mut item)?;

        let item = self.repos.repair_items().save(item).await?;
        info!(
            item_id = item.id,
            device_id = item.device_id,
            cost = ?item.cost,
            "Repair item created"
        );
        Ok(item)
    }

    /// Omitted fields keep their stored values. Supplying a catalog id
    /// re-applies its defaults to whatever the caller left blank, before
    /// stored values are considered.
    pub async fn update(&self, id: i32, input: RepairItemInput) -> DomainResult<RepairItem> {
        let mut item = self.get(id).await?;

        let device_changed = input.device_id != 0 && input.device_id != item.device_id;
        if device_changed {
            require_device(self.repos.as_ref(), input.device_id).await?;
            item.device_id = input.device_id;
        }
        if device_changed || input.repair_session_id.is_some() {
            let session =
                resolve_session(self.repos.as_ref(), item.device_id, input.repair_session_id)
                    .await?;
            item.repair_session_id = session.map(|s| s.id);
        }

        let mut draft = input.draft();
        if let Some(catalog_id) = input.service_catalog_id {
            draft = draft.apply_catalog(&self.require_catalog(catalog_id).await?);
            item.service_catalog_id = Some(catalog_id);
        }
        let draft = draft.or_stored(&item);
        draft.fill(&mut item)?;

        self.repos.repair_items().update(item).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<RepairItem> {
        self.repos
            .repair_items()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("RepairItem", "id", id))
    }

    pub async fn list_by_device(&self, device_id: i32) -> DomainResult<Vec<RepairItem>> {
        require_device(self.repos.as_ref(), device_id).await?;
        self.repos.repair_items().find_by_device(device_id).await
    }

    /// Sum of non-null costs; zero for a device without items
    pub async fn total_cost(&self, device_id: i32) -> DomainResult<i64> {
        let items = self.list_by_device(device_id).await?;
        Ok(items.iter().filter_map(|i| i.cost).sum())
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.repos.repair_items().delete(id).await?;
        info!(item_id = id, "Repair item deleted");
        Ok(())
    }

    async fn require_catalog(&self, id: i32) -> DomainResult<ServiceCatalog> {
        self.repos
            .service_catalog()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("ServiceCatalog", "id", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RepairSession, UserRole};
    use crate::infrastructure::database::test_support::{memory_repos, seed_device, seed_user};

    async fn catalog(repos: &dyn RepositoryProvider) -> ServiceCatalog {
        let mut entry = ServiceCatalog::new("Screen replacement", 900_000);
        entry.default_part_used = Some("OLED panel".into());
        entry.default_warranty_months = Some(6);
        repos.service_catalog().save(entry).await.unwrap()
    }

    #[tokio::test]
    async fn blank_cost_takes_catalog_base_cost() {
        let repos = memory_repos().await;
        let staff = seed_user(repos.as_ref(), "t@shop.vn", UserRole::Technician).await;
        let device = seed_device(repos.as_ref(), &staff.id).await;
        let entry = catalog(repos.as_ref()).await;
        let svc = RepairItemService::new(repos);

        let item = svc
            .create(RepairItemInput {
                device_id: device.id,
                service_catalog_id: Some(entry.id),
                service_name: Some("ignored label".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(item.cost, Some(900_000));
        assert_eq!(item.service_name, "Screen replacement");
        assert_eq!(item.part_used.as_deref(), Some("OLED panel"));
        assert_eq!(item.warranty_months, Some(6));
    }

    #[tokio::test]
    async fn caller_cost_overrides_catalog() {
        let repos = memory_repos().await;
        let staff = seed_user(repos.as_ref(), "t@shop.vn", UserRole::Technician).await;
        let device = seed_device(repos.as_ref(), &staff.id).await;
        let entry = catalog(repos.as_ref()).await;
        let svc = RepairItemService::new(repos);

        let item = svc
            .create(RepairItemInput {
                device_id: device.id,
                service_catalog_id: Some(entry.id),
                cost: Some(750_000),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(item.cost, Some(750_000));
    }

    #[tokio::test]
    async fn missing_cost_without_catalog_is_rejected() {
        let repos = memory_repos().await;
        let staff = seed_user(repos.as_ref(), "t@shop.vn", UserRole::Technician).await;
        let device = seed_device(repos.as_ref(), &staff.id).await;
        let svc = RepairItemService::new(repos);

        let err = svc
            .create(RepairItemInput {
                device_id: device.id,
                service_name: Some("Diagnostics".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn attaches_to_latest_session_and_rejects_foreign_session() {
        let repos = memory_repos().await;
        let staff = seed_user(repos.as_ref(), "t@shop.vn", UserRole::Technician).await;
        let device = seed_device(repos.as_ref(), &staff.id).await;
        let other = seed_device(repos.as_ref(), &staff.id).await;
        repos
            .repair_sessions()
            .save(RepairSession::new(device.id, staff.id.clone()))
            .await
            .unwrap();
        let latest = repos
            .repair_sessions()
            .save(RepairSession::new(device.id, staff.id.clone()))
            .await
            .unwrap();
        let foreign = repos
            .repair_sessions()
            .save(RepairSession::new(other.id, staff.id.clone()))
            .await
            .unwrap();
        let svc = RepairItemService::new(repos);

        let input = RepairItemInput {
            device_id: device.id,
            service_name: Some("Cleaning".into()),
            cost: Some(50_000),
            ..Default::default()
        };
        let item = svc.create(input.clone()).await.unwrap();
        assert_eq!(item.repair_session_id, Some(latest.id));

        let err = svc
            .create(RepairItemInput {
                repair_session_id: Some(foreign.id),
                ..input
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn update_keeps_omitted_fields_and_total_cost_sums() {
        let repos = memory_repos().await;
        let staff = seed_user(repos.as_ref(), "t@shop.vn", UserRole::Technician).await;
        let device = seed_device(repos.as_ref(), &staff.id).await;
        let svc = RepairItemService::new(repos);

        assert_eq!(svc.total_cost(device.id).await.unwrap(), 0);

        let item = svc
            .create(RepairItemInput {
                device_id: device.id,
                service_name: Some("Battery".into()),
                part_used: Some("Cell".into()),
                cost: Some(300_000),
                ..Default::default()
            })
            .await
            .unwrap();
        svc.create(RepairItemInput {
            device_id: device.id,
            service_name: Some("Cleaning".into()),
            cost: Some(50_000),
            ..Default::default()
        })
        .await
        .unwrap();

        let updated = svc
            .update(
                item.id,
                RepairItemInput {
                    cost: Some(320_000),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.service_name, "Battery");
        assert_eq!(updated.part_used.as_deref(), Some("Cell"));
        assert_eq!(updated.cost, Some(320_000));

        assert_eq!(svc.total_cost(device.id).await.unwrap(), 370_000);
    }

    #[tokio::test]
    async fn update_with_catalog_replaces_blank_fields_with_defaults() {
        let repos = memory_repos().await;
        let staff = seed_user(repos.as_ref(), "t@shop.vn", UserRole::Technician).await;
        let device = seed_device(repos.as_ref(), &staff.id).await;
        let entry = catalog(repos.as_ref()).await;
        let svc = RepairItemService::new(repos);

        let item = svc
            .create(RepairItemInput {
                device_id: device.id,
                service_name: Some("Quick fix".into()),
                part_used: Some("Glue".into()),
                cost: Some(10),
                warranty_months: Some(1),
                description: Some("loose hinge".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        let updated = svc
            .update(
                item.id,
                RepairItemInput {
                    service_catalog_id: Some(entry.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.service_catalog_id, Some(entry.id));
        assert_eq!(updated.service_name, "Screen replacement");
        assert_eq!(updated.cost, Some(900_000));
        assert_eq!(updated.part_used.as_deref(), Some("OLED panel"));
        assert_eq!(updated.warranty_months, Some(6));
        assert_eq!(updated.description.as_deref(), Some("loose hinge"));

        let priced = svc
            .update(
                item.id,
                RepairItemInput {
                    service_catalog_id: Some(entry.id),
                    cost: Some(800_000),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(priced.cost, Some(800_000));
    }

    #[tokio::test]
    async fn moving_to_another_device_reattaches_session() {
        let repos = memory_repos().await;
        let staff = seed_user(repos.as_ref(), "t@shop.vn", UserRole::Technician).await;
        let first = seed_device(repos.as_ref(), &staff.id).await;
        let second = seed_device(repos.as_ref(), &staff.id).await;
        let bare = seed_device(repos.as_ref(), &staff.id).await;
        let first_session = repos
            .repair_sessions()
            .save(RepairSession::new(first.id, staff.id.clone()))
            .await
            .unwrap();
        let second_session = repos
            .repair_sessions()
            .save(RepairSession::new(second.id, staff.id.clone()))
            .await
            .unwrap();
        let svc = RepairItemService::new(repos);

        let item = svc
            .create(RepairItemInput {
                device_id: first.id,
                service_name: Some("Cleaning".into()),
                cost: Some(50_000),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(item.repair_session_id, Some(first_session.id));

        let moved = svc
            .update(
                item.id,
                RepairItemInput {
                    device_id: second.id,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(moved.device_id, second.id);
        assert_eq!(moved.repair_session_id, Some(second_session.id));

        let detached = svc
            .update(
                item.id,
                RepairItemInput {
                    device_id: bare.id,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(detached.repair_session_id, None);
    }
}
