//! Site configuration service.

use chrono::Utc;
use newsdesk_common::{AppError, AppResult, IdGenerator};
use newsdesk_db::{
    entities::site_configuration,
    repositories::{CategoryRepository, SiteConfigurationRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Maximum number of key categories in the primary navigation bar.
const MAX_KEY_CATEGORIES: usize = 5;

/// Input for updating the navigation configuration.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSiteConfigInput {
    /// Ordered category IDs for the primary navigation bar.
    pub nav_bar_key_categories: Option<Vec<String>>,
    /// Ordered category IDs for the secondary navigation bar.
    pub nav_bar_sub_categories: Option<Vec<String>>,
}

/// Site configuration service for business logic.
#[derive(Clone)]
pub struct SiteConfigService {
    config_repo: SiteConfigurationRepository,
    category_repo: CategoryRepository,
    id_gen: IdGenerator,
}

impl SiteConfigService {
    /// Create a new site configuration service.
    #[must_use]
    pub const fn new(
        config_repo: SiteConfigurationRepository,
        category_repo: CategoryRepository,
    ) -> Self {
        Self {
            config_repo,
            category_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// The configuration row, seeded on first access.
    pub async fn get(&self) -> AppResult<site_configuration::Model> {
        self.config_repo.get_or_create(&self.id_gen).await
    }

    /// Category IDs of the primary navigation bar.
    pub async fn key_category_ids(&self) -> AppResult<Vec<String>> {
        let config = self.get().await?;
        serde_json::from_value(config.nav_bar_key_categories)
            .map_err(|e| AppError::Internal(format!("Invalid navigation configuration: {e}")))
    }

    async fn validate_category_ids(&self, ids: &[String]) -> AppResult<()> {
        let found = self.category_repo.find_by_ids(ids).await?;
        for id in ids {
            if !found.iter().any(|c| c.id == *id) {
                return Err(AppError::BadRequest(format!("Unknown category: {id}")));
            }
        }
        Ok(())
    }

    /// Update the navigation lists. Every referenced category must exist
    /// and the primary bar holds at most five.
    pub async fn update(
        &self,
        input: UpdateSiteConfigInput,
    ) -> AppResult<site_configuration::Model> {
        input.validate()?;

        let config = self.get().await?;
        let mut active: site_configuration::ActiveModel = config.into();

        if let Some(key_categories) = input.nav_bar_key_categories {
            if key_categories.len() > MAX_KEY_CATEGORIES {
                return Err(AppError::BadRequest(format!(
                    "At most {MAX_KEY_CATEGORIES} key categories are allowed"
                )));
            }
            self.validate_category_ids(&key_categories).await?;
            active.nav_bar_key_categories = Set(serde_json::json!(key_categories));
        }

        if let Some(sub_categories) = input.nav_bar_sub_categories {
            self.validate_category_ids(&sub_categories).await?;
            active.nav_bar_sub_categories = Set(serde_json::json!(sub_categories));
        }

        active.updated_at = Set(Some(Utc::now().into()));
        self.config_repo.update(active).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn config_row() -> site_configuration::Model {
        site_configuration::Model {
            id: "cfg1".to_string(),
            nav_bar_key_categories: serde_json::json!(["c1", "c2"]),
            nav_bar_sub_categories: serde_json::json!([]),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_key_category_ids_decodes_json_list() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[config_row()]])
                .into_connection(),
        );

        let service = SiteConfigService::new(
            SiteConfigurationRepository::new(db.clone()),
            CategoryRepository::new(db),
        );

        let ids = service.key_category_ids().await.unwrap();
        assert_eq!(ids, vec!["c1".to_string(), "c2".to_string()]);
    }

    #[tokio::test]
    async fn test_update_rejects_too_many_key_categories() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[config_row()]])
                .into_connection(),
        );

        let service = SiteConfigService::new(
            SiteConfigurationRepository::new(db.clone()),
            CategoryRepository::new(db),
        );

        let input = UpdateSiteConfigInput {
            nav_bar_key_categories: Some(
                (0..6).map(|i| format!("c{i}")).collect(),
            ),
            nav_bar_sub_categories: None,
        };

        let result = service.update(input).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
