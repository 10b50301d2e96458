//! User service.
//!
//! Accounts originate from the external auth provider; the stored token
//! is an opaque session credential used to attribute votes and guard the
//! admin surface.

use chrono::Utc;
use newsdesk_common::{AppError, AppResult, IdGenerator};
use newsdesk_db::{entities::user, repositories::UserRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for creating a user.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    #[validate(length(min = 1, max = 128))]
    pub username: String,
    #[validate(length(max = 256))]
    pub display_name: Option<String>,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Input for updating a user.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    /// Absent leaves the display name alone; `null` clears it.
    #[validate(length(max = 256))]
    #[serde(default, deserialize_with = "newsdesk_common::serde_util::double_option")]
    pub display_name: Option<Option<String>>,
    #[validate(email)]
    pub email: Option<String>,
    pub is_admin: Option<bool>,
}

/// User service for business logic.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self {
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// All users.
    pub async fn list(&self) -> AppResult<Vec<user::Model>> {
        self.user_repo.list().await
    }

    /// A user by ID, or NotFound.
    pub async fn get_by_id(&self, id: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_id(id).await
    }

    /// Resolve a session token to its user, if the token is known.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<user::Model>> {
        self.user_repo.find_by_token(token).await
    }

    /// Create a user with a fresh session token.
    pub async fn create(&self, input: CreateUserInput) -> AppResult<user::Model> {
        input.validate()?;

        if self
            .user_repo
            .find_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Username already taken: {}",
                input.username
            )));
        }

        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            username: Set(input.username),
            display_name: Set(input.display_name),
            email: Set(input.email),
            token: Set(Some(self.id_gen.generate_token())),
            is_admin: Set(input.is_admin),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        self.user_repo.create(model).await
    }

    /// Update a user.
    pub async fn update(&self, id: &str, input: UpdateUserInput) -> AppResult<user::Model> {
        input.validate()?;

        let user = self.user_repo.get_by_id(id).await?;

        let mut active: user::ActiveModel = user.into();
        if let Some(display_name) = input.display_name {
            active.display_name = Set(display_name);
        }
        if let Some(email) = input.email {
            active.email = Set(email);
        }
        if let Some(is_admin) = input.is_admin {
            active.is_admin = Set(is_admin);
        }
        active.updated_at = Set(Some(Utc::now().into()));

        self.user_repo.update(active).await
    }

    /// Delete a user. Authored articles and votes cascade.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.user_repo.get_by_id(id).await?;
        self.user_repo.delete(id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_create_rejects_taken_username() {
        let existing = user::Model {
            id: "u1".to_string(),
            username: "alice".to_string(),
            display_name: None,
            email: "alice@example.com".to_string(),
            token: None,
            is_admin: false,
            created_at: Utc::now().into(),
            updated_at: None,
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );

        let service = UserService::new(UserRepository::new(db));
        let result = service
            .create(CreateUserInput {
                username: "alice".to_string(),
                display_name: None,
                email: "other@example.com".to_string(),
                is_admin: false,
            })
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }
}
