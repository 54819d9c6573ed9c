//! Create transactions table
//!
//! At most one transaction per device, enforced by a unique index.

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
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::DeviceId).integer().not_null())
                    .col(ColumnDef::new(Transactions::RepairSessionId).integer())
                    .col(
                        ColumnDef::new(Transactions::Total)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::Discount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Transactions::FinalAmount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::PaymentMethod)
                            .string_len(32)
                            .not_null()
                            .default("CASH"),
                    )
                    .col(ColumnDef::new(Transactions::Note).text())
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_device")
                            .from(Transactions::Table, Transactions::DeviceId)
                            .to(Devices::Table, Devices::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_device")
                    .table(Transactions::Table)
                    .col(Transactions::DeviceId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Revenue queries scan by creation time
        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_created_at")
                    .table(Transactions::Table)
                    .col(Transactions::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Transactions {
    Table,
    Id,
    DeviceId,
    RepairSessionId,
    Total,
    Discount,
    FinalAmount,
    PaymentMethod,
    Note,
    CreatedAt,
    UpdatedAt,
}
