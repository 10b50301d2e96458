//! Create news_tag junction table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NewsTag::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(NewsTag::NewsId).string_len(32).not_null())
                    .col(ColumnDef::new(NewsTag::TagId).string_len(32).not_null())
                    .primary_key(Index::create().col(NewsTag::NewsId).col(NewsTag::TagId))
                    .to_owned(),
            )
            .await?;

        // Index: tag_id
        manager
            .create_index(
                Index::create()
                    .name("idx_news_tag_tag_id")
                    .table(NewsTag::Table)
                    .col(NewsTag::TagId)
                    .to_owned(),
            )
            .await?;

        // Foreign key: news_id -> news.id
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_news_tag_news_id")
                    .from(NewsTag::Table, NewsTag::NewsId)
                    .to(News::Table, News::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        // Foreign key: tag_id -> tag.id
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_news_tag_tag_id")
                    .from(NewsTag::Table, NewsTag::TagId)
                    .to(Tag::Table, Tag::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NewsTag::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum NewsTag {
    Table,
    NewsId,
    TagId,
}

#[derive(Iden)]
enum News {
    Table,
    Id,
}

#[derive(Iden)]
enum Tag {
    Table,
    Id,
}
