//! Create seo table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Seo::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Seo::NewsId).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Seo::OpenGraphImage).string_len(1024))
                    .col(ColumnDef::new(Seo::TwitterImage).string_len(1024))
                    .to_owned(),
            )
            .await?;

        // Foreign key: news_id -> news.id
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_seo_news_id")
                    .from(Seo::Table, Seo::NewsId)
                    .to(News::Table, News::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Seo::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Seo {
    Table,
    NewsId,
    OpenGraphImage,
    TwitterImage,
}

#[derive(Iden)]
enum News {
    Table,
    Id,
}
