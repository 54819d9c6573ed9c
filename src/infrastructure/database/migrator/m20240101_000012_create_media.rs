//! Create media table (uploaded file metadata)

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Media::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Media::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Media::OriginalFilename).string().not_null())
                    .col(
                        ColumnDef::new(Media::StoredFilename)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Media::StorageKey).string().not_null())
                    .col(ColumnDef::new(Media::FileSize).big_integer().not_null())
                    .col(ColumnDef::new(Media::ContentType).string().not_null())
                    .col(
                        ColumnDef::new(Media::MediaType)
                            .string_len(20)
                            .not_null()
                            .default("OTHER"),
                    )
                    .col(ColumnDef::new(Media::EntityType).string_len(32))
                    .col(ColumnDef::new(Media::EntityId).string())
                    .col(ColumnDef::new(Media::UploadedBy).string().not_null())
                    .col(ColumnDef::new(Media::Description).text())
                    .col(
                        ColumnDef::new(Media::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Media::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Media::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_media_entity")
                    .table(Media::Table)
                    .col(Media::EntityType)
                    .col(Media::EntityId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Media::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Media {
    Table,
    Id,
    OriginalFilename,
    StoredFilename,
    StorageKey,
    FileSize,
    ContentType,
    MediaType,
    EntityType,
    EntityId,
    UploadedBy,
    Description,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
