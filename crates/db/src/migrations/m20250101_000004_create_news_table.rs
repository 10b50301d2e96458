//! Create news table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(News::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(News::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(News::Slug).string_len(256).not_null())
                    .col(ColumnDef::new(News::Title).string_len(512).not_null())
                    .col(ColumnDef::new(News::Summary).text().not_null())
                    .col(ColumnDef::new(News::Content).text().not_null())
                    .col(ColumnDef::new(News::CoverImage).string_len(1024))
                    .col(ColumnDef::new(News::AuthorId).string_len(32).not_null())
                    .col(ColumnDef::new(News::Published).boolean().not_null().default(false))
                    .col(ColumnDef::new(News::IsFeatured).boolean().not_null().default(false))
                    .col(ColumnDef::new(News::IsBreakingNews).boolean().not_null().default(false))
                    .col(
                        ColumnDef::new(News::PubDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(News::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(News::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Unique index: slug (public lookup key)
        manager
            .create_index(
                Index::create()
                    .name("idx_news_slug")
                    .table(News::Table)
                    .col(News::Slug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: author_id
        manager
            .create_index(
                Index::create()
                    .name("idx_news_author_id")
                    .table(News::Table)
                    .col(News::AuthorId)
                    .to_owned(),
            )
            .await?;

        // Index: published + pub_date (for the default public listing)
        manager
            .create_index(
                Index::create()
                    .name("idx_news_published_pub_date")
                    .table(News::Table)
                    .col(News::Published)
                    .col(News::PubDate)
                    .to_owned(),
            )
            .await?;

        // Foreign key: author_id -> user.id
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_news_author_id")
                    .from(News::Table, News::AuthorId)
                    .to(User::Table, User::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(News::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum News {
    Table,
    Id,
    Slug,
    Title,
    Summary,
    Content,
    CoverImage,
    AuthorId,
    Published,
    IsFeatured,
    IsBreakingNews,
    PubDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
