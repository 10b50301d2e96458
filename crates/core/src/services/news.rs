//! News service.
//!
//! Slug and summary are derived fields: absent an explicit override the
//! slug comes from the title and the summary from the HTML body. On update
//! each derivation re-runs only when its source field actually changed.

use chrono::Utc;
use newsdesk_common::{
    AppError, AppResult, IdGenerator, Page,
    text::{slugify, summarize_html},
};
use newsdesk_db::{
    entities::{analytics, category, news, seo, tag},
    repositories::{NewsFilter, NewsRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for creating a news article.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNewsInput {
    #[validate(length(min = 1, max = 512))]
    pub title: String,
    /// Explicit slug override; derived from the title when absent.
    #[validate(length(min = 1, max = 256))]
    pub slug: Option<String>,
    /// Explicit summary override; derived from the content when absent.
    #[validate(length(max = 1024))]
    pub summary: Option<String>,
    #[validate(length(min = 1))]
    pub content: String,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_breaking_news: bool,
    pub pub_date: Option<sea_orm::prelude::DateTimeWithTimeZone>,
    #[serde(default)]
    pub category_ids: Vec<String>,
    #[serde(default)]
    pub tag_ids: Vec<String>,
}

/// Input for updating a news article.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNewsInput {
    #[validate(length(min = 1, max = 512))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 256))]
    pub slug: Option<String>,
    #[validate(length(max = 1024))]
    pub summary: Option<String>,
    #[validate(length(min = 1))]
    pub content: Option<String>,
    /// Absent leaves the cover alone; `null` removes it.
    #[serde(default, deserialize_with = "newsdesk_common::serde_util::double_option")]
    pub cover_image: Option<Option<String>>,
    pub published: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_breaking_news: Option<bool>,
    pub pub_date: Option<sea_orm::prelude::DateTimeWithTimeZone>,
    /// Full replacement of the category set when supplied.
    pub category_ids: Option<Vec<String>>,
    /// Full replacement of the tag set when supplied.
    pub tag_ids: Option<Vec<String>>,
}

/// A news article with its relations loaded.
#[derive(Debug, Clone)]
pub struct NewsWithRelations {
    pub news: news::Model,
    pub categories: Vec<category::Model>,
    pub tags: Vec<tag::Model>,
    pub seo: Option<seo::Model>,
    pub analytics: Option<analytics::Model>,
}

/// Whether a save transitions the article into the published state for
/// the first time, meaning external analytics should be set up.
#[must_use]
pub const fn should_setup_analytics(was_published: bool, is_published: bool) -> bool {
    !was_published && is_published
}

/// Whether SEO images are stale after an edit: any of title, cover image
/// or content changed. Advisory only; the caller decides what to do.
#[must_use]
pub fn should_regenerate_seo_images(old: &news::Model, new: &news::Model) -> bool {
    old.title != new.title || old.cover_image != new.cover_image || old.content != new.content
}

/// Outcome of a news save with the advisory follow-up flags.
#[derive(Debug, Clone)]
pub struct NewsSaveOutcome {
    pub news: news::Model,
    /// External analytics setup is due (first publish).
    pub setup_analytics: bool,
    /// SEO images are stale and should be regenerated.
    pub regenerate_seo_images: bool,
}

/// News service for business logic.
#[derive(Clone)]
pub struct NewsService {
    news_repo: NewsRepository,
    id_gen: IdGenerator,
}

impl NewsService {
    /// Create a new news service.
    #[must_use]
    pub const fn new(news_repo: NewsRepository) -> Self {
        Self {
            news_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create an article with derived slug/summary and its relations.
    pub async fn create(&self, author_id: &str, input: CreateNewsInput) -> AppResult<NewsSaveOutcome> {
        input.validate()?;

        let slug = match input.slug {
            Some(slug) => slug,
            None => slugify(&input.title),
        };
        if slug.is_empty() {
            return Err(AppError::BadRequest(
                "Title does not produce a usable slug".to_string(),
            ));
        }
        if self.news_repo.find_by_slug(&slug).await?.is_some() {
            return Err(AppError::Conflict(format!("Slug already in use: {slug}")));
        }

        let summary = match input.summary {
            Some(summary) => summary,
            None => summarize_html(&input.content),
        };

        let now = Utc::now();
        let model = news::ActiveModel {
            id: Set(self.id_gen.generate()),
            slug: Set(slug),
            title: Set(input.title),
            summary: Set(summary),
            content: Set(input.content),
            cover_image: Set(input.cover_image),
            author_id: Set(author_id.to_string()),
            published: Set(input.published),
            is_featured: Set(input.is_featured),
            is_breaking_news: Set(input.is_breaking_news),
            pub_date: Set(input.pub_date.unwrap_or_else(|| now.into())),
            created_at: Set(now.into()),
            updated_at: Set(None),
        };

        let news = self.news_repo.create(model).await?;

        self.news_repo.set_categories(&news.id, &input.category_ids).await?;
        self.news_repo.set_tags(&news.id, &input.tag_ids).await?;
        self.news_repo.init_analytics(&news.id).await?;

        let setup_analytics = should_setup_analytics(false, news.published);
        Ok(NewsSaveOutcome {
            setup_analytics,
            regenerate_seo_images: true,
            news,
        })
    }

    /// Update an article. Category/tag sets are replaced wholesale when
    /// supplied, never merged.
    pub async fn update(&self, news_id: &str, input: UpdateNewsInput) -> AppResult<NewsSaveOutcome> {
        input.validate()?;

        let old = self.news_repo.get_by_id(news_id).await?;

        // Re-derive the slug from a changed title unless overridden.
        let slug = match (&input.slug, &input.title) {
            (Some(slug), _) => Some(slug.clone()),
            (None, Some(title)) if *title != old.title => Some(slugify(title)),
            _ => None,
        };
        if let Some(ref slug) = slug
            && *slug != old.slug
            && self.news_repo.find_by_slug(slug).await?.is_some()
        {
            return Err(AppError::Conflict(format!("Slug already in use: {slug}")));
        }

        // Re-derive the summary from changed content unless overridden.
        let summary = match (&input.summary, &input.content) {
            (Some(summary), _) => Some(summary.clone()),
            (None, Some(content)) if *content != old.content => Some(summarize_html(content)),
            _ => None,
        };

        let mut active: news::ActiveModel = old.clone().into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(slug) = slug {
            active.slug = Set(slug);
        }
        if let Some(summary) = summary {
            active.summary = Set(summary);
        }
        if let Some(content) = input.content {
            active.content = Set(content);
        }
        if let Some(cover_image) = input.cover_image {
            active.cover_image = Set(cover_image);
        }
        if let Some(published) = input.published {
            active.published = Set(published);
        }
        if let Some(is_featured) = input.is_featured {
            active.is_featured = Set(is_featured);
        }
        if let Some(is_breaking_news) = input.is_breaking_news {
            active.is_breaking_news = Set(is_breaking_news);
        }
        if let Some(pub_date) = input.pub_date {
            active.pub_date = Set(pub_date);
        }
        active.updated_at = Set(Some(Utc::now().into()));

        let news = self.news_repo.update(active).await?;

        if let Some(ref category_ids) = input.category_ids {
            self.news_repo.set_categories(&news.id, category_ids).await?;
        }
        if let Some(ref tag_ids) = input.tag_ids {
            self.news_repo.set_tags(&news.id, tag_ids).await?;
        }

        Ok(NewsSaveOutcome {
            setup_analytics: should_setup_analytics(old.published, news.published),
            regenerate_seo_images: should_regenerate_seo_images(&old, &news),
            news,
        })
    }

    /// Delete an article; junctions, seo and analytics cascade.
    pub async fn delete(&self, news_id: &str) -> AppResult<()> {
        self.news_repo.get_by_id(news_id).await?;
        self.news_repo.delete(news_id).await
    }

    /// Page through articles matching `filter`.
    pub async fn list(
        &self,
        filter: &NewsFilter,
        page: u64,
        limit: u64,
    ) -> AppResult<Page<news::Model>> {
        self.news_repo.list_with_filters(filter, page, limit).await
    }

    /// An article with relations, by ID. No published check (admin view).
    pub async fn get_by_id(&self, news_id: &str) -> AppResult<NewsWithRelations> {
        let news = self.news_repo.get_by_id(news_id).await?;
        self.with_relations(news).await
    }

    /// A published article with relations, by slug. Bumps the view
    /// counter as a side effect of the public read.
    pub async fn get_published_by_slug(&self, slug: &str) -> AppResult<NewsWithRelations> {
        let news = self.news_repo.get_by_slug(slug).await?;
        if !news.published {
            return Err(AppError::NewsNotFound(slug.to_string()));
        }

        self.news_repo.increment_views(&news.id).await?;
        self.with_relations(news).await
    }

    /// Store SEO image URLs for an article.
    pub async fn set_seo_images(
        &self,
        news_id: &str,
        open_graph_image: Option<String>,
        twitter_image: Option<String>,
    ) -> AppResult<()> {
        self.news_repo.get_by_id(news_id).await?;
        self.news_repo
            .set_seo_images(news_id, open_graph_image, twitter_image)
            .await
    }

    async fn with_relations(&self, news: news::Model) -> AppResult<NewsWithRelations> {
        let categories = self.news_repo.categories_of(&news.id).await?;
        let tags = self.news_repo.tags_of(&news.id).await?;
        let seo = self.news_repo.find_seo(&news.id).await?;
        let analytics = self.news_repo.find_analytics(&news.id).await?;

        Ok(NewsWithRelations {
            news,
            categories,
            tags,
            seo,
            analytics,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn article(title: &str, cover: Option<&str>, content: &str, published: bool) -> news::Model {
        news::Model {
            id: "n1".to_string(),
            slug: "slug".to_string(),
            title: title.to_string(),
            summary: "s".to_string(),
            content: content.to_string(),
            cover_image: cover.map(ToString::to_string),
            author_id: "a1".to_string(),
            published,
            is_featured: false,
            is_breaking_news: false,
            pub_date: Utc::now().into(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[test]
    fn test_setup_analytics_only_on_publish_transition() {
        assert!(should_setup_analytics(false, true));
        assert!(!should_setup_analytics(true, true));
        assert!(!should_setup_analytics(true, false));
        assert!(!should_setup_analytics(false, false));
    }

    #[test]
    fn test_seo_regeneration_on_source_field_changes() {
        let old = article("Title", Some("cover.png"), "<p>Body</p>", true);

        let same = article("Title", Some("cover.png"), "<p>Body</p>", false);
        assert!(!should_regenerate_seo_images(&old, &same));

        let new_title = article("Other", Some("cover.png"), "<p>Body</p>", true);
        assert!(should_regenerate_seo_images(&old, &new_title));

        let new_cover = article("Title", Some("other.png"), "<p>Body</p>", true);
        assert!(should_regenerate_seo_images(&old, &new_cover));

        let new_content = article("Title", Some("cover.png"), "<p>Edited</p>", true);
        assert!(should_regenerate_seo_images(&old, &new_content));
    }

    #[test]
    fn test_slug_derivation_is_stable() {
        // Same title, same slug; the derivation carries no hidden state.
        assert_eq!(slugify("Breaking: Markets Rally!"), "breaking-markets-rally");
        assert_eq!(slugify("Breaking: Markets Rally!"), "breaking-markets-rally");
    }
}
