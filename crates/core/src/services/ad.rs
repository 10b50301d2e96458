//! Advertisement service.

use chrono::Utc;
use newsdesk_common::{AppResult, IdGenerator};
use newsdesk_db::{entities::ad, repositories::AdRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for creating an advertisement.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdInput {
    #[validate(length(min = 1, max = 512))]
    pub title: String,
    #[validate(url)]
    pub media_url: String,
    #[validate(url)]
    pub target_url: Option<String>,
    #[validate(length(min = 1, max = 128))]
    pub placement: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

const fn default_true() -> bool {
    true
}

/// Input for updating an advertisement.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdInput {
    #[validate(length(min = 1, max = 512))]
    pub title: Option<String>,
    #[validate(url)]
    pub media_url: Option<String>,
    /// Absent leaves the target alone; `null` removes it.
    #[serde(default, deserialize_with = "newsdesk_common::serde_util::double_option")]
    pub target_url: Option<Option<String>>,
    #[validate(length(min = 1, max = 128))]
    pub placement: Option<String>,
    pub is_active: Option<bool>,
}

/// Advertisement service for business logic.
#[derive(Clone)]
pub struct AdService {
    ad_repo: AdRepository,
    id_gen: IdGenerator,
}

impl AdService {
    /// Create a new advertisement service.
    #[must_use]
    pub const fn new(ad_repo: AdRepository) -> Self {
        Self {
            ad_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// All advertisements (admin view), newest first.
    pub async fn list(&self) -> AppResult<Vec<ad::Model>> {
        self.ad_repo.list().await
    }

    /// Active advertisements for a placement slot (public view).
    pub async fn list_active(&self, placement: &str) -> AppResult<Vec<ad::Model>> {
        self.ad_repo.find_active_by_placement(placement).await
    }

    /// Create an advertisement.
    pub async fn create(&self, input: CreateAdInput) -> AppResult<ad::Model> {
        input.validate()?;

        let model = ad::ActiveModel {
            id: Set(self.id_gen.generate()),
            title: Set(input.title),
            media_url: Set(input.media_url),
            target_url: Set(input.target_url),
            placement: Set(input.placement),
            is_active: Set(input.is_active),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        self.ad_repo.create(model).await
    }

    /// Update an advertisement.
    pub async fn update(&self, id: &str, input: UpdateAdInput) -> AppResult<ad::Model> {
        input.validate()?;

        let ad = self.ad_repo.get_by_id(id).await?;

        let mut active: ad::ActiveModel = ad.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(media_url) = input.media_url {
            active.media_url = Set(media_url);
        }
        if let Some(target_url) = input.target_url {
            active.target_url = Set(target_url);
        }
        if let Some(placement) = input.placement {
            active.placement = Set(placement);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Some(Utc::now().into()));

        self.ad_repo.update(active).await
    }

    /// Delete an advertisement.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.ad_repo.get_by_id(id).await?;
        self.ad_repo.delete(id).await
    }
}
