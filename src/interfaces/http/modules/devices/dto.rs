//! Device DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::DeviceDetails;
use crate::interfaces::http::modules::repair_items::RepairItemDto;
use crate::interfaces::http::modules::transactions::TransactionDto;

/// Device with its repair items, latest payment and derived totals
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDto {
    pub id: i32,
    pub customer_id: Option<i32>,
    pub brand_id: i32,
    pub model_id: i32,
    pub device_type: String,
    pub imei: Option<String>,
    pub color: Option<String>,
    pub status: String,
    pub received_date: DateTime<Utc>,
    pub expected_return_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub created_by: String,
    pub assigned_to: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub repair_items: Vec<RepairItemDto>,
    pub latest_transaction: Option<TransactionDto>,
    /// Sum of repair item costs
    pub repair_subtotal: i64,
    /// Subtotal minus the latest payment, never below zero
    pub outstanding_amount: i64,
}

impl From<DeviceDetails> for DeviceDto {
    fn from(details: DeviceDetails) -> Self {
        let d = details.device;
        Self {
            id: d.id,
            customer_id: d.customer_id,
            brand_id: d.brand_id,
            model_id: d.model_id,
            device_type: d.device_type,
            imei: d.imei,
            color: d.color,
            status: d.status.to_string(),
            received_date: d.received_date,
            expected_return_date: d.expected_return_date,
            note: d.note,
            created_by: d.created_by,
            assigned_to: d.assigned_to,
            created_at: d.created_at,
            updated_at: d.updated_at,
            repair_items: details
                .repair_items
                .into_iter()
                .map(RepairItemDto::from)
                .collect(),
            latest_transaction: details.latest_transaction.map(TransactionDto::from),
            repair_subtotal: details.balance.repair_subtotal,
            outstanding_amount: details.balance.outstanding_amount,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeviceRequest {
    pub customer_id: Option<i32>,
    pub brand_id: i32,
    pub model_id: i32,
    #[validate(length(max = 20))]
    pub imei: Option<String>,
    #[validate(length(max = 50))]
    pub color: Option<String>,
    /// Default: RECEIVED
    pub status: Option<String>,
    pub received_date: Option<DateTime<Utc>>,
    pub expected_return_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
    /// User ID of the assigned technician
    pub assigned_to: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeviceRequest {
    pub customer_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub model_id: Option<i32>,
    #[validate(length(max = 20))]
    pub imei: Option<String>,
    #[validate(length(max = 50))]
    pub color: Option<String>,
    pub status: Option<String>,
    pub expected_return_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
    /// Empty string clears the assignment
    pub assigned_to: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangeStatusRequest {
    /// RECEIVED, INSPECTING, WAITING_PARTS, REPAIRING, COMPLETED or RETURNED
    pub status: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    /// `null` or empty clears the assignment
    pub assigned_to: Option<String>,
}
