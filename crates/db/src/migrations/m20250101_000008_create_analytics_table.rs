//! Create analytics table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Analytics::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Analytics::NewsId).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Analytics::Views).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Analytics::Likes).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Analytics::Shares).big_integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Analytics::ReadDuration)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // Foreign key: news_id -> news.id
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_analytics_news_id")
                    .from(Analytics::Table, Analytics::NewsId)
                    .to(News::Table, News::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Analytics::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Analytics {
    Table,
    NewsId,
    Views,
    Likes,
    Shares,
    ReadDuration,
}

#[derive(Iden)]
enum News {
    Table,
    Id,
}
