//! Create service_catalog table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceCatalog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceCatalog::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ServiceCatalog::Name).string().not_null())
                    .col(ColumnDef::new(ServiceCatalog::Description).text())
                    .col(
                        ColumnDef::new(ServiceCatalog::BaseCost)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(ServiceCatalog::DefaultPartUsed).string())
                    .col(ColumnDef::new(ServiceCatalog::DefaultWarrantyMonths).integer())
                    .col(
                        ColumnDef::new(ServiceCatalog::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ServiceCatalog::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ServiceCatalog::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServiceCatalog::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ServiceCatalog {
    Table,
    Id,
    Name,
    Description,
    BaseCost,
    DefaultPartUsed,
    DefaultWarrantyMonths,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
