//! Device model DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::services::{DeviceModelInput, DeviceModelUpdate};
use crate::domain::DeviceModel;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceModelDto {
    pub id: i32,
    pub brand_id: i32,
    pub name: String,
    pub device_type: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DeviceModel> for DeviceModelDto {
    fn from(m: DeviceModel) -> Self {
        Self {
            id: m.id,
            brand_id: m.brand_id,
            name: m.name,
            device_type: m.device_type,
            description: m.description,
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeviceModelRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// e.g. PHONE, LAPTOP, TABLET
    #[validate(length(min = 1, max = 50))]
    pub device_type: String,
    pub description: Option<String>,
}

impl From<CreateDeviceModelRequest> for DeviceModelInput {
    fn from(r: CreateDeviceModelRequest) -> Self {
        Self {
            name: r.name,
            device_type: r.device_type,
            description: r.description,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeviceModelRequest {
    pub brand_id: Option<i32>,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub device_type: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl From<UpdateDeviceModelRequest> for DeviceModelUpdate {
    fn from(r: UpdateDeviceModelRequest) -> Self {
        Self {
            brand_id: r.brand_id,
            name: r.name,
            device_type: r.device_type,
            description: r.description,
            is_active: r.is_active,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DeviceTypeParams {
    pub device_type: String,
}
