//! Tag service.

use chrono::Utc;
use newsdesk_common::{AppError, AppResult, IdGenerator};
use newsdesk_db::{entities::tag, repositories::TagRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for creating a tag.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTagInput {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
}

/// Tag service for business logic.
#[derive(Clone)]
pub struct TagService {
    tag_repo: TagRepository,
    id_gen: IdGenerator,
}

impl TagService {
    /// Create a new tag service.
    #[must_use]
    pub const fn new(tag_repo: TagRepository) -> Self {
        Self {
            tag_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// All tags, alphabetical.
    pub async fn list(&self) -> AppResult<Vec<tag::Model>> {
        self.tag_repo.list().await
    }

    /// Create a tag; names are unique.
    pub async fn create(&self, input: CreateTagInput) -> AppResult<tag::Model> {
        input.validate()?;

        if self.tag_repo.find_by_name(&input.name).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Tag already exists: {}",
                input.name
            )));
        }

        let model = tag::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name),
            created_at: Set(Utc::now().into()),
        };

        self.tag_repo.create(model).await
    }

    /// Delete a tag. News junction rows cascade.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.tag_repo.get_by_id(id).await?;
        self.tag_repo.delete(id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let existing = tag::Model {
            id: "t1".to_string(),
            name: "economy".to_string(),
            created_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );

        let service = TagService::new(TagRepository::new(db));
        let result = service
            .create(CreateTagInput {
                name: "economy".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }
}
