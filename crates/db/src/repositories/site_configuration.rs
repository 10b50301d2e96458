//! Site configuration repository.
//!
//! The table holds a single row. Callers never address it by primary
//! key; `get_or_create` finds the existing row or seeds a default one.

use std::sync::Arc;

use crate::entities::{SiteConfiguration, site_configuration};
use newsdesk_common::{AppError, AppResult, IdGenerator};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

/// Site configuration repository for database operations.
#[derive(Clone)]
pub struct SiteConfigurationRepository {
    db: Arc<DatabaseConnection>,
}

impl SiteConfigurationRepository {
    /// Create a new site configuration repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// The configuration row, seeding an empty one on first access.
    pub async fn get_or_create(
        &self,
        id_gen: &IdGenerator,
    ) -> AppResult<site_configuration::Model> {
        let existing = SiteConfiguration::find()
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if let Some(config) = existing {
            return Ok(config);
        }

        let model = site_configuration::ActiveModel {
            id: Set(id_gen.generate()),
            nav_bar_key_categories: Set(serde_json::json!([])),
            nav_bar_sub_categories: Set(serde_json::json!([])),
            updated_at: Set(None),
        };

        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Persist updated navigation settings.
    pub async fn update(
        &self,
        model: site_configuration::ActiveModel,
    ) -> AppResult<site_configuration::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_get_or_create_returns_existing_row() {
        let existing = site_configuration::Model {
            id: "cfg1".to_string(),
            nav_bar_key_categories: serde_json::json!(["c1", "c2"]),
            nav_bar_sub_categories: serde_json::json!([]),
            updated_at: None,
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );

        let repo = SiteConfigurationRepository::new(db);
        let config = repo.get_or_create(&IdGenerator::new()).await.unwrap();

        assert_eq!(config.id, "cfg1");
        assert_eq!(config.nav_bar_key_categories, serde_json::json!(["c1", "c2"]));
    }
}
