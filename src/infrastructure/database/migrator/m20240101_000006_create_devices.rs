//! Create devices table

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_customers::Customers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Devices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Devices::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Devices::CustomerId).integer())
                    .col(ColumnDef::new(Devices::BrandId).integer().not_null())
                    .col(ColumnDef::new(Devices::ModelId).integer().not_null())
                    .col(
                        ColumnDef::new(Devices::DeviceType)
                            .string()
                            .not_null()
                            .default("UNKNOWN"),
                    )
                    .col(ColumnDef::new(Devices::Imei).string())
                    .col(ColumnDef::new(Devices::Color).string())
                    .col(
                        ColumnDef::new(Devices::Status)
                            .string_len(32)
                            .not_null()
                            .default("RECEIVED"),
                    )
                    .col(
                        ColumnDef::new(Devices::ReceivedDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Devices::ExpectedReturnDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Devices::Note).text())
                    .col(ColumnDef::new(Devices::CreatedBy).string().not_null())
                    .col(ColumnDef::new(Devices::AssignedTo).string())
                    .col(
                        ColumnDef::new(Devices::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Devices::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_devices_customer")
                            .from(Devices::Table, Devices::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_devices_status")
                    .table(Devices::Table)
                    .col(Devices::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_devices_customer")
                    .table(Devices::Table)
                    .col(Devices::CustomerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Devices::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Devices {
    Table,
    Id,
    CustomerId,
    BrandId,
    ModelId,
    DeviceType,
    Imei,
    Color,
    Status,
    ReceivedDate,
    ExpectedReturnDate,
    Note,
    CreatedBy,
    AssignedTo,
    CreatedAt,
    UpdatedAt,
}
