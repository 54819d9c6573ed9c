//! Create device_models table
//!
//! A model name is unique within its brand.

use sea_orm_migration::prelude::*;

use super::m20240101_000003_create_brands::Brands;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DeviceModels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DeviceModels::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DeviceModels::BrandId).integer().not_null())
                    .col(ColumnDef::new(DeviceModels::Name).string().not_null())
                    .col(ColumnDef::new(DeviceModels::DeviceType).string().not_null())
                    .col(ColumnDef::new(DeviceModels::Description).string())
                    .col(
                        ColumnDef::new(DeviceModels::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(DeviceModels::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DeviceModels::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_device_models_brand")
                            .from(DeviceModels::Table, DeviceModels::BrandId)
                            .to(Brands::Table, Brands::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_device_models_brand_name")
                    .table(DeviceModels::Table)
                    .col(DeviceModels::BrandId)
                    .col(DeviceModels::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_device_models_device_type")
                    .table(DeviceModels::Table)
                    .col(DeviceModels::DeviceType)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DeviceModels::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum DeviceModels {
    Table,
    Id,
    BrandId,
    Name,
    DeviceType,
    Description,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
