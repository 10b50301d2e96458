//! Create ad table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ad::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Ad::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Ad::Title).string_len(512).not_null())
                    .col(ColumnDef::new(Ad::MediaUrl).string_len(1024).not_null())
                    .col(ColumnDef::new(Ad::TargetUrl).string_len(1024))
                    .col(ColumnDef::new(Ad::Placement).string_len(128).not_null())
                    .col(ColumnDef::new(Ad::IsActive).boolean().not_null().default(true))
                    .col(
                        ColumnDef::new(Ad::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Ad::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Index: placement + is_active (public slot lookups)
        manager
            .create_index(
                Index::create()
                    .name("idx_ad_placement_is_active")
                    .table(Ad::Table)
                    .col(Ad::Placement)
                    .col(Ad::IsActive)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ad::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Ad {
    Table,
    Id,
    Title,
    MediaUrl,
    TargetUrl,
    Placement,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
