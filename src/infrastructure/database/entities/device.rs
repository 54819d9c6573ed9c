//! Device entity (one physical intake)

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Workflow status, shared by devices and repair sessions
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum DeviceStatus {
    #[sea_orm(string_value = "RECEIVED")]
    Received,
    #[sea_orm(string_value = "INSPECTING")]
    Inspecting,
    #[sea_orm(string_value = "WAITING_PARTS")]
    WaitingParts,
    #[sea_orm(string_value = "REPAIRING")]
    Repairing,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "RETURNED")]
    Returned,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "devices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub customer_id: Option<i32>,
    pub brand_id: i32,
    pub model_id: i32,
    pub device_type: String,
    pub imei: Option<String>,
    pub color: Option<String>,
    pub status: DeviceStatus,
    pub received_date: DateTime<Utc>,
    pub expected_return_date: Option<DateTime<Utc>>,
    #[sea_orm(column_type = "Text", nullable)]
    pub note: Option<String>,
    pub created_by: String,
    pub assigned_to: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
    #[sea_orm(has_many = "super::repair_session::Entity")]
    RepairSessions,
    #[sea_orm(has_many = "super::repair_item::Entity")]
    RepairItems,
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transactions,
    #[sea_orm(has_many = "super::warranty::Entity")]
    Warranties,
    #[sea_orm(has_many = "super::realtime_log::Entity")]
    RealtimeLogs,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::repair_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RepairSessions.def()
    }
}

impl Related<super::repair_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RepairItems.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl Related<super::warranty::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Warranties.def()
    }
}

impl Related<super::realtime_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RealtimeLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
