//! Admin news endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};
use newsdesk_common::AppResult;
use newsdesk_core::news::{CreateNewsInput, NewsSaveOutcome, UpdateNewsInput};
use newsdesk_db::entities::news;
use serde::{Deserialize, Serialize};

use crate::{
    endpoints::news::NewsDetailResponse,
    extractors::AdminUser,
    middleware::AppState,
    response::{ApiResponse, ok},
};

/// Saved article plus the advisory follow-up flags.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsSaveResponse {
    #[serde(flatten)]
    pub news: news::Model,
    /// First publish: external analytics setup is due.
    pub setup_analytics: bool,
    /// Title, cover or content changed: SEO images are stale.
    pub regenerate_seo_images: bool,
}

impl From<NewsSaveOutcome> for NewsSaveResponse {
    fn from(outcome: NewsSaveOutcome) -> Self {
        Self {
            news: outcome.news,
            setup_analytics: outcome.setup_analytics,
            regenerate_seo_images: outcome.regenerate_seo_images,
        }
    }
}

/// Create an article. The caller becomes the author.
async fn create(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Json(input): Json<CreateNewsInput>,
) -> AppResult<ApiResponse<NewsSaveResponse>> {
    let outcome = state.news_service.create(&admin.id, input).await?;
    Ok(ApiResponse::ok(outcome.into()))
}

/// An article with relations, regardless of published state.
async fn show(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<NewsDetailResponse>> {
    let detail = state.news_service.get_by_id(&id).await?;

    Ok(ApiResponse::ok(NewsDetailResponse {
        news: detail.news,
        categories: detail.categories,
        tags: detail.tags,
        seo: detail.seo,
        analytics: detail.analytics,
    }))
}

/// Update an article.
async fn update(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateNewsInput>,
) -> AppResult<ApiResponse<NewsSaveResponse>> {
    let outcome = state.news_service.update(&id, input).await?;
    Ok(ApiResponse::ok(outcome.into()))
}

/// Delete an article.
async fn delete(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.news_service.delete(&id).await?;
    Ok(ok())
}

/// SEO image URLs for an article.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoImagesRequest {
    pub open_graph_image: Option<String>,
    pub twitter_image: Option<String>,
}

/// Store generated SEO image URLs.
async fn set_seo_images(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SeoImagesRequest>,
) -> AppResult<impl axum::response::IntoResponse> {
    state
        .news_service
        .set_seo_images(&id, req.open_graph_image, req.twitter_image)
        .await?;
    Ok(ok())
}

/// Create the admin news router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create))
        .route("/{id}", get(show).put(update).delete(delete))
        .route("/{id}/seo", put(set_seo_images))
}
