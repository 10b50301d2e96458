//! Category service.

use chrono::Utc;
use newsdesk_common::{AppError, AppResult, IdGenerator, text::slugify};
use newsdesk_db::{entities::category, repositories::CategoryRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for creating a category.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryInput {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    /// Explicit slug override; derived from the name when absent.
    #[validate(length(min = 1, max = 128))]
    pub slug: Option<String>,
    #[validate(length(max = 2048))]
    pub description: Option<String>,
}

/// Input for updating a category.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryInput {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub slug: Option<String>,
    /// Absent leaves the description alone; `null` clears it.
    #[validate(length(max = 2048))]
    #[serde(default, deserialize_with = "newsdesk_common::serde_util::double_option")]
    pub description: Option<Option<String>>,
}

/// Category service for business logic.
#[derive(Clone)]
pub struct CategoryService {
    category_repo: CategoryRepository,
    id_gen: IdGenerator,
}

impl CategoryService {
    /// Create a new category service.
    #[must_use]
    pub const fn new(category_repo: CategoryRepository) -> Self {
        Self {
            category_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// All categories, alphabetical.
    pub async fn list(&self) -> AppResult<Vec<category::Model>> {
        self.category_repo.list().await
    }

    /// A category by ID, or NotFound.
    pub async fn get_by_id(&self, id: &str) -> AppResult<category::Model> {
        self.category_repo.get_by_id(id).await
    }

    /// A category by slug, or NotFound.
    pub async fn get_by_slug(&self, slug: &str) -> AppResult<category::Model> {
        self.category_repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category not found: {slug}")))
    }

    /// Create a category with a unique slug.
    pub async fn create(&self, input: CreateCategoryInput) -> AppResult<category::Model> {
        input.validate()?;

        let slug = match input.slug {
            Some(slug) => slug,
            None => slugify(&input.name),
        };
        if slug.is_empty() {
            return Err(AppError::BadRequest(
                "Name does not produce a usable slug".to_string(),
            ));
        }
        if self.category_repo.find_by_slug(&slug).await?.is_some() {
            return Err(AppError::Conflict(format!("Slug already in use: {slug}")));
        }

        let model = category::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name),
            slug: Set(slug),
            description: Set(input.description),
            created_at: Set(Utc::now().into()),
        };

        self.category_repo.create(model).await
    }

    /// Update a category.
    pub async fn update(&self, id: &str, input: UpdateCategoryInput) -> AppResult<category::Model> {
        input.validate()?;

        let old = self.category_repo.get_by_id(id).await?;

        let slug = match (&input.slug, &input.name) {
            (Some(slug), _) => Some(slug.clone()),
            (None, Some(name)) if *name != old.name => Some(slugify(name)),
            _ => None,
        };
        if let Some(ref slug) = slug
            && *slug != old.slug
            && self.category_repo.find_by_slug(slug).await?.is_some()
        {
            return Err(AppError::Conflict(format!("Slug already in use: {slug}")));
        }

        let mut active: category::ActiveModel = old.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(slug) = slug {
            active.slug = Set(slug);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }

        self.category_repo.update(active).await
    }

    /// Delete a category. News junction rows cascade; articles survive.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.category_repo.get_by_id(id).await?;
        self.category_repo.delete(id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_create_rejects_duplicate_slug() {
        let existing = category::Model {
            id: "c1".to_string(),
            name: "Politics".to_string(),
            slug: "politics".to_string(),
            description: None,
            created_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );

        let service = CategoryService::new(CategoryRepository::new(db));
        let result = service
            .create(CreateCategoryInput {
                name: "Politics".to_string(),
                slug: None,
                description: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }
}
