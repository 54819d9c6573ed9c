//! Create repair_items table

use sea_orm_migration::prelude::*;

use super::m20240101_000006_create_devices::Devices;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RepairItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RepairItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RepairItems::DeviceId).integer().not_null())
                    .col(ColumnDef::new(RepairItems::RepairSessionId).integer())
                    .col(ColumnDef::new(RepairItems::ServiceCatalogId).integer())
                    .col(ColumnDef::new(RepairItems::ServiceName).string().not_null())
                    .col(ColumnDef::new(RepairItems::PartUsed).string())
                    .col(ColumnDef::new(RepairItems::Cost).big_integer())
                    .col(ColumnDef::new(RepairItems::WarrantyMonths).integer())
                    .col(ColumnDef::new(RepairItems::Description).text())
                    .col(
                        ColumnDef::new(RepairItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RepairItems::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_repair_items_device")
                            .from(RepairItems::Table, RepairItems::DeviceId)
                            .to(Devices::Table, Devices::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_repair_items_device")
                    .table(RepairItems::Table)
                    .col(RepairItems::DeviceId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RepairItems::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum RepairItems {
    Table,
    Id,
    DeviceId,
    RepairSessionId,
    ServiceCatalogId,
    ServiceName,
    PartUsed,
    Cost,
    WarrantyMonths,
    Description,
    CreatedAt,
    UpdatedAt,
}
