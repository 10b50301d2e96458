//! Admin poll endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use newsdesk_common::AppResult;
use newsdesk_core::poll::{CreatePollInput, UpdatePollInput};

use crate::{
    endpoints::polls::PollResponse,
    extractors::AdminUser,
    middleware::AppState,
    response::{ApiResponse, ok},
};

/// Create a poll with its options.
async fn create(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePollInput>,
) -> AppResult<ApiResponse<PollResponse>> {
    let details = state.poll_service.create(Some(&admin.id), input).await?;
    Ok(ApiResponse::ok(PollResponse::from_details(details, None)))
}

/// Update a poll. Supplying options replaces the whole set and discards
/// the votes attached to the old options.
async fn update(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdatePollInput>,
) -> AppResult<ApiResponse<PollResponse>> {
    let details = state.poll_service.update(&id, input).await?;
    Ok(ApiResponse::ok(PollResponse::from_details(details, None)))
}

/// Delete a poll.
async fn delete(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.poll_service.delete(&id).await?;
    Ok(ok())
}

/// Create the admin poll router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create))
        .route("/{id}", axum::routing::put(update).delete(delete))
}
