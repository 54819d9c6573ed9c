//! Device models, owned by a brand

use std::sync::Arc;

use tracing::info;

use super::clean;
use crate::domain::{DeviceModel, DomainError, DomainResult, RepositoryProvider};

#[derive(Debug, Clone, Default)]
pub struct DeviceModelInput {
    pub name: String,
    pub device_type: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DeviceModelUpdate {
    pub brand_id: Option<i32>,
    pub name: Option<String>,
    pub device_type: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

pub struct DeviceModelService {
    repos: Arc<dyn RepositoryProvider>,
}

impl DeviceModelService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create(&self, brand_id: i32, input: DeviceModelInput) -> DomainResult<DeviceModel> {
        self.require_brand(brand_id).await?;

        let name = input.name.trim();
        if name.is_empty() {
            return Err(DomainError::missing_field("name"));
        }
        let device_type = input.device_type.trim();
        if device_type.is_empty() {
            return Err(DomainError::missing_field("deviceType"));
        }
        self.ensure_name_free(brand_id, name, None).await?;

        let mut model = DeviceModel::new(brand_id, name, device_type);
        model.description = clean(input.description);

        let model = self.repos.device_models().save(model).await?;
        info!(model_id = model.id, brand_id, "Device model created");
        Ok(model)
    }

    pub async fn update(&self, id: i32, update: DeviceModelUpdate) -> DomainResult<DeviceModel> {
        let mut model = self.get(id).await?;

        if let Some(brand_id) = update.brand_id {
            self.require_brand(brand_id).await?;
            model.brand_id = brand_id;
        }
        if let Some(name) = update.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(DomainError::missing_field("name"));
            }
            model.name = name.to_string();
        }
        self.ensure_name_free(model.brand_id, &model.name, Some(id))
            .await?;

        if let Some(device_type) = clean(update.device_type) {
            model.device_type = device_type;
        }
        if update.description.is_some() {
            model.description = clean(update.description);
        }
        if let Some(active) = update.is_active {
            model.is_active = active;
        }

        self.repos.device_models().update(model).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<DeviceModel> {
        self.repos
            .device_models()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("DeviceModel", "id", id))
    }

    pub async fn list_active_by_brand(&self, brand_id: i32) -> DomainResult<Vec<DeviceModel>> {
        self.require_brand(brand_id).await?;
        self.repos.device_models().find_active_by_brand(brand_id).await
    }

    pub async fn list_by_device_type(&self, device_type: &str) -> DomainResult<Vec<DeviceModel>> {
        self.repos
            .device_models()
            .find_by_device_type(device_type.trim())
            .await
    }

    /// Removes only the model row
    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.repos.device_models().delete(id).await?;
        info!(model_id = id, "Device model deleted");
        Ok(())
    }

    async fn require_brand(&self, brand_id: i32) -> DomainResult<()> {
        self.repos
            .brands()
            .find_by_id(brand_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Brand", "id", brand_id))
    }

    async fn ensure_name_free(
        &self,
        brand_id: i32,
        name: &str,
        own_id: Option<i32>,
    ) -> DomainResult<()> {
        match self
            .repos
            .device_models()
            .find_by_brand_and_name(brand_id, name)
            .await?
        {
            Some(existing) if Some(existing.id) != own_id => Err(DomainError::Conflict(format!(
                "Model name already exists for this brand: {}",
                name
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Brand;
    use crate::infrastructure::database::test_support::memory_repos;

    fn input(name: &str, device_type: &str) -> DeviceModelInput {
        DeviceModelInput {
            name: name.into(),
            device_type: device_type.into(),
            description: None,
        }
    }

    #[tokio::test]
    async fn brand_must_exist() {
        let svc = DeviceModelService::new(memory_repos().await);
        let err = svc.create(42, input("Galaxy S24", "PHONE")).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Brand", .. }));
    }

    #[tokio::test]
    async fn name_is_unique_within_brand_only() {
        let repos = memory_repos().await;
        let a = repos.brands().save(Brand::new("A")).await.unwrap();
        let b = repos.brands().save(Brand::new("B")).await.unwrap();
        let svc = DeviceModelService::new(repos);

        svc.create(a.id, input("Pro", "PHONE")).await.unwrap();
        svc.create(b.id, input("Pro", "TABLET")).await.unwrap();
        let err = svc.create(a.id, input("pro", "PHONE")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let tablets = svc.list_by_device_type("tablet").await.unwrap();
        assert_eq!(tablets.len(), 1);
        assert_eq!(tablets[0].brand_id, b.id);
    }
}
