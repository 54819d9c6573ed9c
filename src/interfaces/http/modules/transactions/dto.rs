//! Payment DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::services::TransactionInput;
use crate::domain::{DomainResult, PaymentMethod, Transaction};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    pub id: i32,
    pub device_id: i32,
    pub repair_session_id: Option<i32>,
    pub total: i64,
    pub discount: i64,
    pub final_amount: i64,
    /// CASH, CARD, BANK_TRANSFER or E_WALLET
    pub payment_method: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionDto {
    fn from(t: Transaction) -> Self {
        Self {
            id: t.id,
            device_id: t.device_id,
            repair_session_id: t.repair_session_id,
            total: t.total,
            discount: t.discount,
            final_amount: t.final_amount,
            payment_method: t.payment_method.to_string(),
            note: t.note,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub device_id: i32,
    pub repair_session_id: Option<i32>,
    #[validate(range(min = 0))]
    pub total: i64,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub discount: i64,
    pub payment_method: String,
    #[validate(length(max = 1000))]
    pub note: Option<String>,
}

impl TransactionRequest {
    pub fn into_input(self) -> DomainResult<TransactionInput> {
        Ok(TransactionInput {
            device_id: self.device_id,
            repair_session_id: self.repair_session_id,
            total: self.total,
            discount: self.discount,
            payment_method: self.payment_method.parse::<PaymentMethod>()?,
            note: self.note,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenueDto {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub revenue: i64,
}
