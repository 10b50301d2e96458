//! Admin tag endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use newsdesk_common::AppResult;
use newsdesk_core::tag::CreateTagInput;
use newsdesk_db::entities::tag;

use crate::{
    extractors::AdminUser,
    middleware::AppState,
    response::{ApiResponse, ok},
};

/// Create a tag.
async fn create(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTagInput>,
) -> AppResult<ApiResponse<tag::Model>> {
    Ok(ApiResponse::ok(state.tag_service.create(input).await?))
}

/// Delete a tag.
async fn delete(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.tag_service.delete(&id).await?;
    Ok(ok())
}

/// Create the admin tag router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create))
        .route("/{id}", axum::routing::delete(delete))
}
