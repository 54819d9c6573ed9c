//! Reusable service templates that seed repair items

use std::sync::Arc;

use tracing::info;

use super::clean;
use crate::domain::{DomainError, DomainResult, RepositoryProvider, ServiceCatalog};
use crate::shared::{PageRequest, PaginatedResult};

#[derive(Debug, Clone, Default)]
pub struct ServiceCatalogInput {
    pub name: String,
    pub description: Option<String>,
    pub base_cost: i64,
    pub default_part_used: Option<String>,
    pub default_warranty_months: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct ServiceCatalogUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub base_cost: Option<i64>,
    pub default_part_used: Option<String>,
    pub default_warranty_months: Option<i32>,
    pub is_active: Option<bool>,
}

pub struct ServiceCatalogService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ServiceCatalogService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create(&self, input: ServiceCatalogInput) -> DomainResult<ServiceCatalog> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(DomainError::missing_field("name"));
        }
        validate_amounts(input.base_cost, input.default_warranty_months)?;
        self.ensure_name_free(name, None).await?;

        let mut entry = ServiceCatalog::new(name, input.base_cost);
        entry.description = clean(input.description);
        entry.default_part_used = clean(input.default_part_used);
        entry.default_warranty_months = input.default_warranty_months;
        entry.is_active = input.is_active.unwrap_or(true);

        let entry = self.repos.service_catalog().save(entry).await?;
        info!(catalog_id = entry.id, name = %entry.name, "Service catalog entry created");
        Ok(entry)
    }

    /// Existing repair items keep the values they were created with.
    pub async fn update(&self, id: i32, update: ServiceCatalogUpdate) -> DomainResult<ServiceCatalog> {
        let mut entry = self.get(id).await?;

        if let Some(name) = update.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(DomainError::missing_field("name"));
            }
            self.ensure_name_free(name, Some(id)).await?;
            entry.name = name.to_string();
        }
        if let Some(cost) = update.base_cost {
            entry.base_cost = cost;
        }
        if update.default_warranty_months.is_some() {
            entry.default_warranty_months = update.default_warranty_months;
        }
        validate_amounts(entry.base_cost, entry.default_warranty_months)?;

        if update.description.is_some() {
            entry.description = clean(update.description);
        }
        if update.default_part_used.is_some() {
            entry.default_part_used = clean(update.default_part_used);
        }
        if let Some(active) = update.is_active {
            entry.is_active = active;
        }

        self.repos.service_catalog().update(entry).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<ServiceCatalog> {
        self.repos
            .service_catalog()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("ServiceCatalog", "id", id))
    }

    pub async fn list(&self, page: PageRequest) -> DomainResult<PaginatedResult<ServiceCatalog>> {
        self.repos.service_catalog().list(page).await
    }

    pub async fn list_active(&self) -> DomainResult<Vec<ServiceCatalog>> {
        self.repos.service_catalog().find_active().await
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.repos.service_catalog().delete(id).await?;
        info!(catalog_id = id, "Service catalog entry deleted");
        Ok(())
    }

    async fn ensure_name_free(&self, name: &str, own_id: Option<i32>) -> DomainResult<()> {
        match self.repos.service_catalog().find_by_name(name).await? {
            Some(existing) if Some(existing.id) != own_id => Err(DomainError::Conflict(format!(
                "Service name already exists: {}",
                name
            ))),
            _ => Ok(()),
        }
    }
}

fn validate_amounts(base_cost: i64, warranty_months: Option<i32>) -> DomainResult<()> {
    if base_cost < 0 {
        return Err(DomainError::Validation("baseCost must not be negative".into()));
    }
    if matches!(warranty_months, Some(m) if m < 0) {
        return Err(DomainError::Validation(
            "defaultWarrantyMonths must not be negative".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_support::memory_repos;

    fn input(name: &str, cost: i64) -> ServiceCatalogInput {
        ServiceCatalogInput {
            name: name.into(),
            base_cost: cost,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn names_are_unique_case_insensitively() {
        let svc = ServiceCatalogService::new(memory_repos().await);
        svc.create(input("Screen replacement", 900_000)).await.unwrap();
        let err = svc.create(input("SCREEN REPLACEMENT", 1)).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn negative_base_cost_is_rejected() {
        let svc = ServiceCatalogService::new(memory_repos().await);
        let err = svc.create(input("Cleaning", -5)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn update_can_keep_its_own_name() {
        let svc = ServiceCatalogService::new(memory_repos().await);
        let entry = svc.create(input("Cleaning", 50_000)).await.unwrap();
        let update = ServiceCatalogUpdate {
            name: Some("cleaning".into()),
            base_cost: Some(60_000),
            ..Default::default()
        };
        let entry = svc.update(entry.id, update).await.unwrap();
        assert_eq!(entry.base_cost, 60_000);
        assert_eq!(entry.name, "cleaning");
    }
}
