//! Public news endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use newsdesk_common::{AppResult, Page};
use newsdesk_db::{
    entities::{analytics, category, news, seo, tag},
    repositories::NewsFilter,
};
use serde::{Deserialize, Serialize};

use crate::{middleware::AppState, response::ApiResponse};

const DEFAULT_PAGE_SIZE: u64 = 20;
const MAX_PAGE_SIZE: u64 = 100;

/// Filter and pagination parameters for the news listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsListQuery {
    pub author_id: Option<String>,
    pub published: Option<bool>,
    pub start_date: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub end_date: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub search: Option<String>,
    /// Comma-separated category IDs; the article must carry all of them.
    pub category_ids: Option<String>,
    pub category_slug: Option<String>,
    /// Comma-separated tag IDs; the article must carry any of them.
    pub tag_ids: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

fn split_ids(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(ToString::to_string)
            .collect()
    })
    .unwrap_or_default()
}

impl NewsListQuery {
    fn filter(&self) -> NewsFilter {
        NewsFilter {
            author_id: self.author_id.clone(),
            published: self.published,
            start_date: self.start_date,
            end_date: self.end_date,
            search_term: self.search.clone(),
            category_ids: split_ids(self.category_ids.as_deref()),
            category_slug: self.category_slug.clone(),
            tag_ids: split_ids(self.tag_ids.as_deref()),
        }
    }
}

/// Article detail with relations.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsDetailResponse {
    #[serde(flatten)]
    pub news: news::Model,
    pub categories: Vec<category::Model>,
    pub tags: Vec<tag::Model>,
    pub seo: Option<seo::Model>,
    pub analytics: Option<analytics::Model>,
}

/// List articles with filters and pagination.
async fn list_news(
    State(state): State<AppState>,
    Query(query): Query<NewsListQuery>,
) -> AppResult<Json<Page<news::Model>>> {
    let page = query.page.unwrap_or(1);
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .min(MAX_PAGE_SIZE);

    let result = state.news_service.list(&query.filter(), page, limit).await?;
    Ok(Json(result))
}

/// A published article by slug. Bumps the view counter.
async fn get_news(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<ApiResponse<NewsDetailResponse>> {
    let detail = state.news_service.get_published_by_slug(&slug).await?;

    Ok(ApiResponse::ok(NewsDetailResponse {
        news: detail.news,
        categories: detail.categories,
        tags: detail.tags,
        seo: detail.seo,
        analytics: detail.analytics,
    }))
}

/// All categories.
async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<category::Model>>> {
    Ok(ApiResponse::ok(state.category_service.list().await?))
}

/// All tags.
async fn list_tags(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<tag::Model>>> {
    Ok(ApiResponse::ok(state.tag_service.list().await?))
}

/// Create the public news router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_news))
        .route("/categories", get(list_categories))
        .route("/tags", get(list_tags))
        .route("/{slug}", get(get_news))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_ids_handles_commas_and_blanks() {
        assert_eq!(
            split_ids(Some("a, b,,c ")),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
        assert!(split_ids(Some("")).is_empty());
        assert!(split_ids(None).is_empty());
    }

    #[test]
    fn test_query_maps_onto_filter_semantics() {
        let query = NewsListQuery {
            category_ids: Some("c1,c2".to_string()),
            tag_ids: Some("t1".to_string()),
            published: Some(true),
            ..NewsListQuery::default()
        };

        let filter = query.filter();
        assert_eq!(filter.category_ids.len(), 2);
        assert_eq!(filter.tag_ids.len(), 1);
        assert_eq!(filter.published, Some(true));
        assert!(filter.search_term.is_none());
    }
}
