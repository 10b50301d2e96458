//! Poll service.
//!
//! Polls carry two independent notions of "open": the stored status flag
//! (flipped by admins, never automatically) and the start/end date window.
//! A poll past its end date stays `active` in storage but drops out of the
//! public listing through the date filter alone.

use chrono::Utc;
use newsdesk_common::{AppError, AppResult, IdGenerator, Page};
use newsdesk_db::{
    entities::{poll, poll_option, poll_vote},
    repositories::{PollOptionRepository, PollRepository, PollVoteRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Maximum number of options per poll.
const MAX_OPTIONS: usize = 10;

/// Maximum option text length.
const MAX_OPTION_LENGTH: usize = 512;

/// Input for creating a poll.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePollInput {
    #[validate(length(min = 1, max = 512))]
    pub title: String,
    #[validate(length(max = 2048))]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<poll::PollStatus>,
    pub start_date: Option<sea_orm::prelude::DateTimeWithTimeZone>,
    pub end_date: Option<sea_orm::prelude::DateTimeWithTimeZone>,
    /// Option texts in display order.
    pub options: Vec<String>,
}

/// Input for updating a poll.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePollInput {
    #[validate(length(min = 1, max = 512))]
    pub title: Option<String>,
    /// Absent leaves the description alone; `null` clears it.
    #[validate(length(max = 2048))]
    #[serde(default, deserialize_with = "newsdesk_common::serde_util::double_option")]
    pub description: Option<Option<String>>,
    pub status: Option<poll::PollStatus>,
    pub start_date: Option<sea_orm::prelude::DateTimeWithTimeZone>,
    /// Absent leaves the end date alone; `null` clears it back to no expiry.
    #[serde(default, deserialize_with = "newsdesk_common::serde_util::double_option")]
    pub end_date: Option<Option<sea_orm::prelude::DateTimeWithTimeZone>>,
    /// Replaces the whole option set when supplied. Destructive: votes on
    /// the discarded options cascade away.
    pub options: Option<Vec<String>>,
}

/// A poll with its options and votes.
#[derive(Debug, Clone)]
pub struct PollWithDetails {
    pub poll: poll::Model,
    pub options: Vec<poll_option::Model>,
    pub votes: Vec<poll_vote::Model>,
}

/// Winning option of a poll with its tally.
#[derive(Debug, Clone)]
pub struct PollWinner {
    pub option: poll_option::Model,
    pub vote_count: u64,
}

/// Pick the winning option: linear scan in option order with a
/// strictly-greater comparison, so the first-seen option wins ties.
/// `None` when the poll has no options.
#[must_use]
pub fn leading_option(
    options: &[poll_option::Model],
    votes: &[poll_vote::Model],
) -> Option<PollWinner> {
    let mut winner: Option<PollWinner> = None;

    for option in options {
        let count = votes.iter().filter(|v| v.option_id == option.id).count() as u64;
        let beats = winner.as_ref().is_none_or(|w| count > w.vote_count);
        if beats {
            winner = Some(PollWinner {
                option: option.clone(),
                vote_count: count,
            });
        }
    }

    winner
}

/// Poll service for business logic.
#[derive(Clone)]
pub struct PollService {
    poll_repo: PollRepository,
    option_repo: PollOptionRepository,
    vote_repo: PollVoteRepository,
    id_gen: IdGenerator,
}

impl PollService {
    /// Create a new poll service.
    #[must_use]
    pub const fn new(
        poll_repo: PollRepository,
        option_repo: PollOptionRepository,
        vote_repo: PollVoteRepository,
    ) -> Self {
        Self {
            poll_repo,
            option_repo,
            vote_repo,
            id_gen: IdGenerator::new(),
        }
    }

    fn validate_options(options: &[String]) -> AppResult<()> {
        if options.len() < 2 {
            return Err(AppError::BadRequest(
                "Poll must have at least 2 options".to_string(),
            ));
        }
        if options.len() > MAX_OPTIONS {
            return Err(AppError::BadRequest(format!(
                "Poll cannot have more than {MAX_OPTIONS} options"
            )));
        }
        for option in options {
            if option.trim().is_empty() {
                return Err(AppError::BadRequest(
                    "Poll options cannot be empty".to_string(),
                ));
            }
            if option.len() > MAX_OPTION_LENGTH {
                return Err(AppError::BadRequest(format!(
                    "Poll option is too long (max {MAX_OPTION_LENGTH} chars)"
                )));
            }
        }
        Ok(())
    }

    fn option_models(&self, poll_id: &str, texts: &[String]) -> Vec<poll_option::ActiveModel> {
        texts
            .iter()
            .enumerate()
            .map(|(position, text)| poll_option::ActiveModel {
                id: Set(self.id_gen.generate()),
                poll_id: Set(poll_id.to_string()),
                text: Set(text.clone()),
                position: Set(position as i32),
            })
            .collect()
    }

    /// Create a poll with its options. Returns the poll with options in
    /// insertion order and no votes.
    pub async fn create(
        &self,
        user_id: Option<&str>,
        input: CreatePollInput,
    ) -> AppResult<PollWithDetails> {
        input.validate()?;
        Self::validate_options(&input.options)?;

        let now = Utc::now();
        let poll_id = self.id_gen.generate();

        let model = poll::ActiveModel {
            id: Set(poll_id.clone()),
            title: Set(input.title),
            description: Set(input.description),
            status: Set(input.status.unwrap_or(poll::PollStatus::Active)),
            start_date: Set(input.start_date.unwrap_or_else(|| now.into())),
            end_date: Set(input.end_date),
            user_id: Set(user_id.map(ToString::to_string)),
            created_at: Set(now.into()),
            updated_at: Set(None),
        };

        let poll = self.poll_repo.create(model).await?;
        self.option_repo
            .insert_for_poll(self.option_models(&poll.id, &input.options))
            .await?;

        let options = self.option_repo.find_by_poll(&poll.id).await?;
        Ok(PollWithDetails {
            poll,
            options,
            votes: Vec::new(),
        })
    }

    /// Update a poll. Supplying `options` replaces the whole option set.
    pub async fn update(&self, poll_id: &str, input: UpdatePollInput) -> AppResult<PollWithDetails> {
        input.validate()?;

        let poll = self.poll_repo.get_by_id(poll_id).await?;

        if let Some(ref options) = input.options {
            Self::validate_options(options)?;
            tracing::warn!(
                poll_id,
                "Replacing poll options; votes on the discarded options are dropped"
            );
            self.option_repo
                .replace_for_poll(poll_id, self.option_models(poll_id, options))
                .await?;
        }

        let mut active: poll::ActiveModel = poll.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        if let Some(start_date) = input.start_date {
            active.start_date = Set(start_date);
        }
        if let Some(end_date) = input.end_date {
            active.end_date = Set(end_date);
        }
        active.updated_at = Set(Some(Utc::now().into()));

        let poll = self.poll_repo.update(active).await?;
        self.with_details(poll, None).await
    }

    /// Delete a poll. Options and votes cascade.
    pub async fn delete(&self, poll_id: &str) -> AppResult<()> {
        self.poll_repo.get_by_id(poll_id).await?;
        self.poll_repo.delete(poll_id).await
    }

    /// A poll with options and votes. When `vote_user_id` is given the
    /// embedded votes are that user's only.
    pub async fn get_with_details(
        &self,
        poll_id: &str,
        vote_user_id: Option<&str>,
    ) -> AppResult<PollWithDetails> {
        let poll = self.poll_repo.get_by_id(poll_id).await?;
        self.with_details(poll, vote_user_id).await
    }

    async fn with_details(
        &self,
        poll: poll::Model,
        vote_user_id: Option<&str>,
    ) -> AppResult<PollWithDetails> {
        let options = self.option_repo.find_by_poll(&poll.id).await?;

        let votes = match vote_user_id {
            Some(user_id) => self
                .vote_repo
                .find_by_poll_and_user(&poll.id, user_id)
                .await?
                .into_iter()
                .collect(),
            None => self.vote_repo.find_by_poll(&poll.id).await?,
        };

        Ok(PollWithDetails { poll, options, votes })
    }

    /// Polls currently open for voting (status active and inside the date
    /// window), newest first.
    pub async fn list_active(&self, vote_user_id: Option<&str>) -> AppResult<Vec<PollWithDetails>> {
        let polls = self.poll_repo.find_active(Utc::now().into()).await?;

        let mut result = Vec::with_capacity(polls.len());
        for poll in polls {
            result.push(self.with_details(poll, vote_user_id).await?);
        }
        Ok(result)
    }

    /// All polls regardless of status, newest first.
    pub async fn list_all(&self, page: u64, limit: u64) -> AppResult<Page<poll::Model>> {
        self.poll_repo.list(None, page, limit).await
    }

    /// Record or change a user's vote.
    ///
    /// The write is a single upsert conflicting on (poll_id, user_id), so
    /// a concurrent first vote and revote from the same user collapse into
    /// one row instead of racing.
    pub async fn vote(
        &self,
        poll_id: &str,
        option_id: &str,
        user_id: &str,
    ) -> AppResult<PollWithDetails> {
        let poll = self.poll_repo.get_by_id(poll_id).await?;

        let options = self.option_repo.find_by_poll(poll_id).await?;
        if !options.iter().any(|o| o.id == option_id) {
            return Err(AppError::NotFound(format!(
                "Option not found in poll: {option_id}"
            )));
        }

        let model = poll_vote::ActiveModel {
            id: Set(self.id_gen.generate()),
            poll_id: Set(poll_id.to_string()),
            option_id: Set(option_id.to_string()),
            user_id: Set(user_id.to_string()),
            created_at: Set(Utc::now().into()),
        };
        self.vote_repo.upsert(model).await?;

        self.with_details(poll, None).await
    }

    /// Retract a user's vote. NotFound when no vote exists.
    pub async fn remove_vote(&self, poll_id: &str, user_id: &str) -> AppResult<PollWithDetails> {
        let poll = self.poll_repo.get_by_id(poll_id).await?;

        let removed = self.vote_repo.delete_by_poll_and_user(poll_id, user_id).await?;
        if removed == 0 {
            return Err(AppError::NotFound(format!(
                "No vote found for user in poll: {poll_id}"
            )));
        }

        self.with_details(poll, None).await
    }

    /// The option with the most votes, or `None` for an option-less poll.
    pub async fn winner(&self, poll_id: &str) -> AppResult<Option<PollWinner>> {
        self.poll_repo.get_by_id(poll_id).await?;

        let options = self.option_repo.find_by_poll(poll_id).await?;
        let votes = self.vote_repo.find_by_poll(poll_id).await?;

        Ok(leading_option(&options, &votes))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn service(db: DatabaseConnection) -> PollService {
        let db = Arc::new(db);
        PollService::new(
            PollRepository::new(Arc::clone(&db)),
            PollOptionRepository::new(Arc::clone(&db)),
            PollVoteRepository::new(db),
        )
    }

    fn poll_row(id: &str) -> poll::Model {
        poll::Model {
            id: id.to_string(),
            title: "Best section?".to_string(),
            description: None,
            status: poll::PollStatus::Active,
            start_date: Utc::now().into(),
            end_date: None,
            user_id: Some("admin1".to_string()),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn option(id: &str, position: i32) -> poll_option::Model {
        poll_option::Model {
            id: id.to_string(),
            poll_id: "p1".to_string(),
            text: format!("Option {id}"),
            position,
        }
    }

    fn vote(id: &str, option_id: &str, user_id: &str) -> poll_vote::Model {
        poll_vote::Model {
            id: id.to_string(),
            poll_id: "p1".to_string(),
            option_id: option_id.to_string(),
            user_id: user_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_winner_no_options_is_none() {
        assert!(leading_option(&[], &[]).is_none());
    }

    #[test]
    fn test_winner_ties_resolve_to_first_option() {
        // Counts [3, 3, 1]: the scan must keep index 0, not index 1.
        let options = vec![option("o1", 0), option("o2", 1), option("o3", 2)];
        let votes = vec![
            vote("v1", "o1", "u1"),
            vote("v2", "o1", "u2"),
            vote("v3", "o1", "u3"),
            vote("v4", "o2", "u4"),
            vote("v5", "o2", "u5"),
            vote("v6", "o2", "u6"),
            vote("v7", "o3", "u7"),
        ];

        let winner = leading_option(&options, &votes).unwrap();
        assert_eq!(winner.option.id, "o1");
        assert_eq!(winner.vote_count, 3);
    }

    #[test]
    fn test_winner_with_zero_votes_everywhere() {
        // All-new options after a destructive edit: every count is 0 and
        // the first option is reported with a zero tally.
        let options = vec![option("o1", 0), option("o2", 1)];
        let winner = leading_option(&options, &[]).unwrap();

        assert_eq!(winner.option.id, "o1");
        assert_eq!(winner.vote_count, 0);
    }

    #[test]
    fn test_winner_strictly_greater_takes_over() {
        let options = vec![option("o1", 0), option("o2", 1)];
        let votes = vec![
            vote("v1", "o1", "u1"),
            vote("v2", "o2", "u2"),
            vote("v3", "o2", "u3"),
        ];

        let winner = leading_option(&options, &votes).unwrap();
        assert_eq!(winner.option.id, "o2");
        assert_eq!(winner.vote_count, 2);
    }

    #[test]
    fn test_option_count_validation() {
        assert!(PollService::validate_options(&["a".to_string()]).is_err());
        assert!(PollService::validate_options(&["a".to_string(), "b".to_string()]).is_ok());
        assert!(PollService::validate_options(&vec!["x".to_string(); 11]).is_err());
        assert!(
            PollService::validate_options(&["a".to_string(), "  ".to_string()]).is_err()
        );
    }

    #[test]
    fn test_update_input_distinguishes_null_from_missing() {
        // `null` must clear the end date back to "no expiry"; an absent
        // field must leave it untouched.
        let cleared: UpdatePollInput = serde_json::from_str(r#"{"endDate": null}"#).unwrap();
        assert_eq!(cleared.end_date, Some(None));
        assert!(cleared.description.is_none());

        let untouched: UpdatePollInput = serde_json::from_str("{}").unwrap();
        assert!(untouched.end_date.is_none());

        let set: UpdatePollInput =
            serde_json::from_str(r#"{"description": "Weekly reader poll"}"#).unwrap();
        assert_eq!(
            set.description,
            Some(Some("Weekly reader poll".to_string()))
        );
    }

    #[tokio::test]
    async fn test_vote_upserts_and_returns_details() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![poll_row("p1")]])
            .append_query_results([vec![option("o1", 0), option("o2", 1)]])
            .append_query_results([vec![option("o1", 0), option("o2", 1)]])
            .append_query_results([vec![vote("v1", "o1", "u1")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let details = service(db).vote("p1", "o1", "u1").await.unwrap();

        assert_eq!(details.votes.len(), 1);
        assert_eq!(details.votes[0].option_id, "o1");
    }

    #[tokio::test]
    async fn test_vote_rejects_option_outside_poll() {
        // Poll exists, but the option belongs to another poll: no vote row
        // may be written.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![poll_row("p1")]])
            .append_query_results([vec![option("o1", 0)]])
            .into_connection();

        let result = service(db).vote("p1", "o9", "u1").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_vote_on_missing_poll_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<poll::Model>::new()])
            .into_connection();

        let result = service(db).vote("missing", "o1", "u1").await;
        assert!(matches!(result, Err(AppError::PollNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_with_options_replaces_the_set() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![poll_row("p1")]])
            .append_query_results([vec![poll_row("p1")]])
            .append_query_results([vec![option("o3", 0), option("o4", 1)]])
            .append_query_results([Vec::<poll_vote::Model>::new()])
            .append_exec_results([
                // old options deleted
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 2,
                },
                // replacements inserted
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 2,
                },
            ])
            .into_connection();

        let input = UpdatePollInput {
            title: None,
            description: None,
            status: None,
            start_date: None,
            end_date: None,
            options: Some(vec!["Culture".to_string(), "Science".to_string()]),
        };

        let details = service(db).update("p1", input).await.unwrap();

        assert_eq!(details.options.len(), 2);
        assert!(details.votes.is_empty());
    }
}
