use async_trait::async_trait;

use super::model::DeviceModel;
use crate::domain::DomainResult;

#[async_trait]
pub trait DeviceModelRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<DeviceModel>>;
    async fn find_by_brand_and_name(
        &self,
        brand_id: i32,
        name: &str,
    ) -> DomainResult<Option<DeviceModel>>;
    async fn find_active_by_brand(&self, brand_id: i32) -> DomainResult<Vec<DeviceModel>>;
    async fn find_by_device_type(&self, device_type: &str) -> DomainResult<Vec<DeviceModel>>;
    async fn save(&self, model: DeviceModel) -> DomainResult<DeviceModel>;
    async fn update(&self, model: DeviceModel) -> DomainResult<DeviceModel>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
