//! Create poll_vote table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PollVote::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PollVote::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(PollVote::PollId).string_len(32).not_null())
                    .col(ColumnDef::new(PollVote::OptionId).string_len(32).not_null())
                    .col(ColumnDef::new(PollVote::UserId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(PollVote::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (poll_id, user_id). One vote per user per poll;
        // the revote upsert conflicts on this index.
        manager
            .create_index(
                Index::create()
                    .name("idx_poll_vote_poll_id_user_id")
                    .table(PollVote::Table)
                    .col(PollVote::PollId)
                    .col(PollVote::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: option_id (tally queries)
        manager
            .create_index(
                Index::create()
                    .name("idx_poll_vote_option_id")
                    .table(PollVote::Table)
                    .col(PollVote::OptionId)
                    .to_owned(),
            )
            .await?;

        // Foreign key: poll_id -> poll.id
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_poll_vote_poll_id")
                    .from(PollVote::Table, PollVote::PollId)
                    .to(Poll::Table, Poll::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        // Foreign key: option_id -> poll_option.id
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_poll_vote_option_id")
                    .from(PollVote::Table, PollVote::OptionId)
                    .to(PollOption::Table, PollOption::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        // Foreign key: user_id -> user.id
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_poll_vote_user_id")
                    .from(PollVote::Table, PollVote::UserId)
                    .to(User::Table, User::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PollVote::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PollVote {
    Table,
    Id,
    PollId,
    OptionId,
    UserId,
    CreatedAt,
}

#[derive(Iden)]
enum Poll {
    Table,
    Id,
}

#[derive(Iden)]
enum PollOption {
    Table,
    Id,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
