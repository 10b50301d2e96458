//! Poll, poll option and poll vote repositories.

use std::sync::Arc;

use crate::entities::{Poll, PollOption, PollVote, poll, poll_option, poll_vote};
use newsdesk_common::{AppError, AppResult, Page};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, sea_query::OnConflict,
};

/// Poll repository for database operations.
#[derive(Clone)]
pub struct PollRepository {
    db: Arc<DatabaseConnection>,
}

impl PollRepository {
    /// Create a new poll repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a poll by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<poll::Model>> {
        Poll::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a poll by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<poll::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::PollNotFound(id.to_string()))
    }

    /// Page through polls, newest first, optionally restricted by status.
    pub async fn list(
        &self,
        status: Option<poll::PollStatus>,
        page: u64,
        limit: u64,
    ) -> AppResult<Page<poll::Model>> {
        let page = page.max(1);
        let limit = limit.max(1);

        let mut query = Poll::find().order_by_desc(poll::Column::CreatedAt);
        if let Some(status) = status {
            query = query.filter(poll::Column::Status.eq(status));
        }

        let paginator = query.paginate(self.db.as_ref(), limit);

        let total_count = paginator
            .num_items()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let data = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(Page::new(data, page, limit, total_count))
    }

    /// Polls open for voting at `now`: status active, started, and not
    /// past their end date (NULL end date means no expiry).
    pub async fn find_active(
        &self,
        now: sea_orm::prelude::DateTimeWithTimeZone,
    ) -> AppResult<Vec<poll::Model>> {
        Poll::find()
            .filter(poll::Column::Status.eq(poll::PollStatus::Active))
            .filter(poll::Column::StartDate.lte(now))
            .filter(
                Condition::any()
                    .add(poll::Column::EndDate.is_null())
                    .add(poll::Column::EndDate.gte(now)),
            )
            .order_by_desc(poll::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new poll.
    pub async fn create(&self, model: poll::ActiveModel) -> AppResult<poll::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a poll.
    pub async fn update(&self, model: poll::ActiveModel) -> AppResult<poll::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a poll (options and votes cascade).
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Poll::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

/// Poll option repository for database operations.
#[derive(Clone)]
pub struct PollOptionRepository {
    db: Arc<DatabaseConnection>,
}

impl PollOptionRepository {
    /// Create a new poll option repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an option by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<poll_option::Model>> {
        PollOption::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Options of a poll in insertion order.
    pub async fn find_by_poll(&self, poll_id: &str) -> AppResult<Vec<poll_option::Model>> {
        PollOption::find()
            .filter(poll_option::Column::PollId.eq(poll_id))
            .order_by_asc(poll_option::Column::Position)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert the option list for a freshly created poll.
    pub async fn insert_for_poll(
        &self,
        models: Vec<poll_option::ActiveModel>,
    ) -> AppResult<()> {
        if models.is_empty() {
            return Ok(());
        }

        PollOption::insert_many(models)
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Replace the full option list of a poll. Destructive: existing
    /// options are deleted and their votes cascade away with them.
    pub async fn replace_for_poll(
        &self,
        poll_id: &str,
        models: Vec<poll_option::ActiveModel>,
    ) -> AppResult<()> {
        PollOption::delete_many()
            .filter(poll_option::Column::PollId.eq(poll_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.insert_for_poll(models).await
    }
}

/// Poll vote repository for database operations.
#[derive(Clone)]
pub struct PollVoteRepository {
    db: Arc<DatabaseConnection>,
}

impl PollVoteRepository {
    /// Create a new poll vote repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Record or change a user's vote in a single statement.
    ///
    /// The unique index on (poll_id, user_id) makes this an atomic
    /// insert-or-retarget: a concurrent first vote and revote cannot
    /// produce two rows for the same user.
    pub async fn upsert(&self, model: poll_vote::ActiveModel) -> AppResult<()> {
        Self::upsert_statement(model)
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    fn upsert_statement(model: poll_vote::ActiveModel) -> sea_orm::Insert<poll_vote::ActiveModel> {
        PollVote::insert(model).on_conflict(
            OnConflict::columns([poll_vote::Column::PollId, poll_vote::Column::UserId])
                .update_columns([poll_vote::Column::OptionId, poll_vote::Column::CreatedAt])
                .to_owned(),
        )
    }

    /// All votes in a poll.
    pub async fn find_by_poll(&self, poll_id: &str) -> AppResult<Vec<poll_vote::Model>> {
        PollVote::find()
            .filter(poll_vote::Column::PollId.eq(poll_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// A user's vote in a poll, if any.
    pub async fn find_by_poll_and_user(
        &self,
        poll_id: &str,
        user_id: &str,
    ) -> AppResult<Option<poll_vote::Model>> {
        PollVote::find()
            .filter(poll_vote::Column::PollId.eq(poll_id))
            .filter(poll_vote::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Retract a user's vote. Returns the number of rows removed.
    pub async fn delete_by_poll_and_user(
        &self,
        poll_id: &str,
        user_id: &str,
    ) -> AppResult<u64> {
        let result = PollVote::delete_many()
            .filter(poll_vote::Column::PollId.eq(poll_id))
            .filter(poll_vote::Column::UserId.eq(user_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }

    /// Vote count per option ID for a poll.
    pub async fn count_by_option(&self, poll_id: &str) -> AppResult<Vec<(String, u64)>> {
        let votes = self.find_by_poll(poll_id).await?;

        let mut counts: Vec<(String, u64)> = Vec::new();
        for vote in votes {
            match counts.iter_mut().find(|(id, _)| *id == vote.option_id) {
                Some((_, n)) => *n += 1,
                None => counts.push((vote.option_id, 1)),
            }
        }
        Ok(counts)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_poll(id: &str, status: poll::PollStatus) -> poll::Model {
        poll::Model {
            id: id.to_string(),
            title: "Best editor?".to_string(),
            description: None,
            status,
            start_date: Utc::now().into(),
            end_date: None,
            user_id: Some("admin1".to_string()),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_vote(id: &str, poll_id: &str, option_id: &str, user_id: &str) -> poll_vote::Model {
        poll_vote::Model {
            id: id.to_string(),
            poll_id: poll_id.to_string(),
            option_id: option_id.to_string(),
            user_id: user_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<poll::Model>::new()])
                .into_connection(),
        );

        let repo = PollRepository::new(db);
        let result = repo.get_by_id("missing").await;

        match result {
            Err(AppError::PollNotFound(id)) => assert_eq!(id, "missing"),
            _ => panic!("Expected PollNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_list_returns_page() {
        let polls = vec![
            create_test_poll("p1", poll::PollStatus::Active),
            create_test_poll("p2", poll::PollStatus::Active),
        ];

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(2))
                }]])
                .append_query_results([polls])
                .into_connection(),
        );

        let repo = PollRepository::new(db);
        let page = repo.list(None, 1, 10).await.unwrap();

        assert_eq!(page.data.len(), 2);
        assert_eq!(page.meta.total_count, 2);
        assert!(!page.meta.has_next_page);
    }

    #[tokio::test]
    async fn test_count_by_option_aggregates_votes() {
        let votes = vec![
            create_test_vote("v1", "p1", "o1", "u1"),
            create_test_vote("v2", "p1", "o2", "u2"),
            create_test_vote("v3", "p1", "o1", "u3"),
        ];

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([votes])
                .into_connection(),
        );

        let repo = PollVoteRepository::new(db);
        let counts = repo.count_by_option("p1").await.unwrap();

        assert_eq!(counts.len(), 2);
        assert!(counts.contains(&("o1".to_string(), 2)));
        assert!(counts.contains(&("o2".to_string(), 1)));
    }

    #[test]
    fn test_vote_upsert_conflicts_on_poll_and_user() {
        use sea_orm::{DbBackend, QueryTrait, Set};

        let model = poll_vote::ActiveModel {
            id: Set("v1".to_string()),
            poll_id: Set("p1".to_string()),
            option_id: Set("o1".to_string()),
            user_id: Set("u1".to_string()),
            created_at: Set(Utc::now().into()),
        };

        let sql = PollVoteRepository::upsert_statement(model)
            .build(DbBackend::Postgres)
            .to_string();

        // Single atomic statement: insert-or-retarget on the unique
        // (poll_id, user_id) pair, never a second row per user.
        assert!(sql.contains("ON CONFLICT (\"poll_id\", \"user_id\") DO UPDATE"));
        assert!(sql.contains("\"option_id\" = \"excluded\".\"option_id\""));
        assert!(sql.contains("\"created_at\" = \"excluded\".\"created_at\""));
    }

    #[tokio::test]
    async fn test_delete_by_poll_and_user_reports_rows() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = PollVoteRepository::new(db);
        let removed = repo.delete_by_poll_and_user("p1", "u1").await.unwrap();

        assert_eq!(removed, 1);
    }
}
