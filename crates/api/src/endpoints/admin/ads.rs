//! Admin advertisement endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use newsdesk_common::AppResult;
use newsdesk_core::ad::{CreateAdInput, UpdateAdInput};
use newsdesk_db::entities::ad;

use crate::{
    extractors::AdminUser,
    middleware::AppState,
    response::{ApiResponse, ok},
};

/// All advertisements including inactive ones.
async fn list(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<ad::Model>>> {
    Ok(ApiResponse::ok(state.ad_service.list().await?))
}

/// Create an advertisement.
async fn create(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Json(input): Json<CreateAdInput>,
) -> AppResult<ApiResponse<ad::Model>> {
    Ok(ApiResponse::ok(state.ad_service.create(input).await?))
}

/// Update an advertisement.
async fn update(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateAdInput>,
) -> AppResult<ApiResponse<ad::Model>> {
    Ok(ApiResponse::ok(state.ad_service.update(&id, input).await?))
}

/// Delete an advertisement.
async fn delete(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.ad_service.delete(&id).await?;
    Ok(ok())
}

/// Create the admin ads router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", axum::routing::put(update).delete(delete))
}
