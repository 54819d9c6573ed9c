//! Create repair_sessions table

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
                    .table(RepairSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RepairSessions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RepairSessions::DeviceId).integer().not_null())
                    .col(
                        ColumnDef::new(RepairSessions::Status)
                            .string_len(32)
                            .not_null()
                            .default("RECEIVED"),
                    )
                    .col(
                        ColumnDef::new(RepairSessions::ReceivedDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RepairSessions::ExpectedReturnDate)
                            .timestamp_with_time_zone(),
                    )
                    .col(ColumnDef::new(RepairSessions::Note).text())
                    .col(ColumnDef::new(RepairSessions::AssignedTo).string())
                    .col(ColumnDef::new(RepairSessions::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(RepairSessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RepairSessions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_repair_sessions_device")
                            .from(RepairSessions::Table, RepairSessions::DeviceId)
                            .to(Devices::Table, Devices::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_repair_sessions_device")
                    .table(RepairSessions::Table)
                    .col(RepairSessions::DeviceId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RepairSessions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum RepairSessions {
    Table,
    Id,
    DeviceId,
    Status,
    ReceivedDate,
    ExpectedReturnDate,
    Note,
    AssignedTo,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
