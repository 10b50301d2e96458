//! Admin category endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use newsdesk_common::AppResult;
use newsdesk_core::category::{CreateCategoryInput, UpdateCategoryInput};
use newsdesk_db::entities::category;

use crate::{
    extractors::AdminUser,
    middleware::AppState,
    response::{ApiResponse, ok},
};

/// Create a category.
async fn create(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCategoryInput>,
) -> AppResult<ApiResponse<category::Model>> {
    Ok(ApiResponse::ok(state.category_service.create(input).await?))
}

/// Update a category.
async fn update(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateCategoryInput>,
) -> AppResult<ApiResponse<category::Model>> {
    Ok(ApiResponse::ok(
        state.category_service.update(&id, input).await?,
    ))
}

/// Delete a category.
async fn delete(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.category_service.delete(&id).await?;
    Ok(ok())
}

/// Create the admin category router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create))
        .route("/{id}", axum::routing::put(update).delete(delete))
}
