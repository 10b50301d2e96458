//! Create site_configuration table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SiteConfiguration::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SiteConfiguration::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SiteConfiguration::NavBarKeyCategories)
                            .json_binary()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(SiteConfiguration::NavBarSubCategories)
                            .json_binary()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(SiteConfiguration::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SiteConfiguration::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum SiteConfiguration {
    Table,
    Id,
    NavBarKeyCategories,
    NavBarSubCategories,
    UpdatedAt,
}
