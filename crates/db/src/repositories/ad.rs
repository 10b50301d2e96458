//! Advertisement repository.

use std::sync::Arc;

use crate::entities::{Ad, ad};
use newsdesk_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Advertisement repository for database operations.
#[derive(Clone)]
pub struct AdRepository {
    db: Arc<DatabaseConnection>,
}

impl AdRepository {
    /// Create a new advertisement repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an advertisement by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<ad::Model>> {
        Ad::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an advertisement by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<ad::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Ad not found: {id}")))
    }

    /// All advertisements, newest first.
    pub async fn list(&self) -> AppResult<Vec<ad::Model>> {
        Ad::find()
            .order_by_desc(ad::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Active advertisements for a placement slot, newest first.
    pub async fn find_active_by_placement(&self, placement: &str) -> AppResult<Vec<ad::Model>> {
        Ad::find()
            .filter(ad::Column::Placement.eq(placement))
            .filter(ad::Column::IsActive.eq(true))
            .order_by_desc(ad::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new advertisement.
    pub async fn create(&self, model: ad::ActiveModel) -> AppResult<ad::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an advertisement.
    pub async fn update(&self, model: ad::ActiveModel) -> AppResult<ad::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete an advertisement.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Ad::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
