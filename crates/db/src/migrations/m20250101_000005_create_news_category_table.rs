//! Create news_category junction table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NewsCategory::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(NewsCategory::NewsId).string_len(32).not_null())
                    .col(ColumnDef::new(NewsCategory::CategoryId).string_len(32).not_null())
                    .primary_key(
                        Index::create()
                            .col(NewsCategory::NewsId)
                            .col(NewsCategory::CategoryId),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: category_id (membership subqueries scan this side)
        manager
            .create_index(
                Index::create()
                    .name("idx_news_category_category_id")
                    .table(NewsCategory::Table)
                    .col(NewsCategory::CategoryId)
                    .to_owned(),
            )
            .await?;

        // Foreign key: news_id -> news.id
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_news_category_news_id")
                    .from(NewsCategory::Table, NewsCategory::NewsId)
                    .to(News::Table, News::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        // Foreign key: category_id -> category.id
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_news_category_category_id")
                    .from(NewsCategory::Table, NewsCategory::CategoryId)
                    .to(Category::Table, Category::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NewsCategory::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum NewsCategory {
    Table,
    NewsId,
    CategoryId,
}

#[derive(Iden)]
enum News {
    Table,
    Id,
}

#[derive(Iden)]
enum Category {
    Table,
    Id,
}
