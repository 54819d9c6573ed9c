//! Create realtime_logs table (append-only device audit trail)

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
                    .table(RealtimeLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RealtimeLogs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RealtimeLogs::DeviceId).integer().not_null())
                    .col(ColumnDef::new(RealtimeLogs::Action).string_len(32).not_null())
                    .col(ColumnDef::new(RealtimeLogs::Detail).text())
                    .col(ColumnDef::new(RealtimeLogs::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(RealtimeLogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_realtime_logs_device")
                            .from(RealtimeLogs::Table, RealtimeLogs::DeviceId)
                            .to(Devices::Table, Devices::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_realtime_logs_device_created")
                    .table(RealtimeLogs::Table)
                    .col(RealtimeLogs::DeviceId)
                    .col(RealtimeLogs::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RealtimeLogs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum RealtimeLogs {
    Table,
    Id,
    DeviceId,
    Action,
    Detail,
    CreatedBy,
    CreatedAt,
}
