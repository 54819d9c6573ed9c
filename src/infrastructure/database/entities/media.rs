//! Media (uploaded file metadata) entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum MediaType {
    #[sea_orm(string_value = "IMAGE")]
    Image,
    #[sea_orm(string_value = "DOCUMENT")]
    Document,
    #[sea_orm(string_value = "OTHER")]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum EntityType {
    #[sea_orm(string_value = "DEVICE")]
    Device,
    #[sea_orm(string_value = "CUSTOMER")]
    Customer,
    #[sea_orm(string_value = "REPAIR_SESSION")]
    RepairSession,
    #[sea_orm(string_value = "REPAIR_ITEM")]
    RepairItem,
    #[sea_orm(string_value = "WARRANTY")]
    Warranty,
    #[sea_orm(string_value = "TRANSACTION")]
    Transaction,
    #[sea_orm(string_value = "USER")]
    User,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "media")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub original_filename: String,
    #[sea_orm(unique)]
    pub stored_filename: String,
    pub storage_key: String,
    pub file_size: i64,
    pub content_type: String,
    pub media_type: MediaType,
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<String>,
    pub uploaded_by: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
