//! Create warranties table

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
                    .table(Warranties::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Warranties::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Warranties::DeviceId).integer().not_null())
                    .col(
                        ColumnDef::new(Warranties::RepairSessionId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Warranties::RepairItemId).integer())
                    .col(
                        ColumnDef::new(Warranties::WarrantyMonths)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Warranties::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Warranties::EndDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Warranties::WarrantyCode)
                            .string_len(10)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Warranties::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Warranties::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_warranties_device")
                            .from(Warranties::Table, Warranties::DeviceId)
                            .to(Devices::Table, Devices::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_warranties_device")
                    .table(Warranties::Table)
                    .col(Warranties::DeviceId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_warranties_end_date")
                    .table(Warranties::Table)
                    .col(Warranties::EndDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Warranties::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Warranties {
    Table,
    Id,
    DeviceId,
    RepairSessionId,
    RepairItemId,
    WarrantyMonths,
    StartDate,
    EndDate,
    WarrantyCode,
    CreatedAt,
    UpdatedAt,
}
