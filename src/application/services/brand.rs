//! Brand catalog

use std::sync::Arc;

use tracing::info;

use super::clean;
use crate::domain::{Brand, DomainError, DomainResult, RepositoryProvider};
use crate::shared::{PageRequest, PaginatedResult};

#[derive(Debug, Clone, Default)]
pub struct BrandUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

pub struct BrandService {
    repos: Arc<dyn RepositoryProvider>,
}

impl BrandService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create(&self, name: &str, description: Option<String>) -> DomainResult<Brand> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::missing_field("name"));
        }
        self.ensure_name_free(name, None).await?;

        let mut brand = Brand::new(name);
        brand.description = clean(description);

        let brand = self.repos.brands().save(brand).await?;
        info!(brand_id = brand.id, name = %brand.name, "Brand created");
        Ok(brand)
    }

    pub async fn update(&self, id: i32, update: BrandUpdate) -> DomainResult<Brand> {
        let mut brand = self.get(id).await?;

        if let Some(name) = update.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(DomainError::missing_field("name"));
            }
            self.ensure_name_free(name, Some(id)).await?;
            brand.name = name.to_string();
        }
        if update.description.is_some() {
            brand.description = clean(update.description);
        }
        if let Some(active) = update.is_active {
            brand.is_active = active;
        }

        self.repos.brands().update(brand).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Brand> {
        self.repos
            .brands()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Brand", "id", id))
    }

    pub async fn list(&self, page: PageRequest) -> DomainResult<PaginatedResult<Brand>> {
        self.repos.brands().list(page).await
    }

    pub async fn list_active(&self) -> DomainResult<Vec<Brand>> {
        self.repos.brands().find_active().await
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.repos.brands().delete(id).await?;
        info!(brand_id = id, "Brand deleted");
        Ok(())
    }

    async fn ensure_name_free(&self, name: &str, own_id: Option<i32>) -> DomainResult<()> {
        match self.repos.brands().find_by_name(name).await? {
            Some(existing) if Some(existing.id) != own_id => Err(DomainError::Conflict(format!(
                "Brand name already exists: {}",
                name
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_support::memory_repos;

    #[tokio::test]
    async fn duplicate_name_is_a_conflict_regardless_of_case() {
        let svc = BrandService::new(memory_repos().await);
        svc.create("Samsung", None).await.unwrap();
        let err = svc.create("samsung", None).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn renaming_to_own_name_is_allowed_and_inactive_brands_are_hidden() {
        let svc = BrandService::new(memory_repos().await);
        let apple = svc.create("Apple", None).await.unwrap();
        svc.create("Xiaomi", None).await.unwrap();

        let update = BrandUpdate {
            name: Some("APPLE".into()),
            is_active: Some(false),
            ..Default::default()
        };
        let apple = svc.update(apple.id, update).await.unwrap();
        assert_eq!(apple.name, "APPLE");

        let active = svc.list_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Xiaomi");
    }
}
