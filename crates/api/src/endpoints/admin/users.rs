//! Admin user endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use newsdesk_common::AppResult;
use newsdesk_core::user::{CreateUserInput, UpdateUserInput};
use newsdesk_db::entities::user;
use serde::Serialize;

use crate::{
    extractors::AdminUser,
    middleware::AppState,
    response::{ApiResponse, ok},
};

/// User without the session token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub display_name: Option<String>,
    pub email: String,
    pub is_admin: bool,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
            email: user.email,
            is_admin: user.is_admin,
        }
    }
}

/// All users.
async fn list(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let users = state.user_service.list().await?;
    Ok(ApiResponse::ok(
        users.into_iter().map(UserResponse::from).collect(),
    ))
}

/// A user by ID.
async fn show(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<UserResponse>> {
    Ok(ApiResponse::ok(state.user_service.get_by_id(&id).await?.into()))
}

/// Create a user.
async fn create(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Json(input): Json<CreateUserInput>,
) -> AppResult<ApiResponse<UserResponse>> {
    Ok(ApiResponse::ok(state.user_service.create(input).await?.into()))
}

/// Update a user.
async fn update(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateUserInput>,
) -> AppResult<ApiResponse<UserResponse>> {
    Ok(ApiResponse::ok(
        state.user_service.update(&id, input).await?.into(),
    ))
}

/// Delete a user.
async fn delete(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.user_service.delete(&id).await?;
    Ok(ok())
}

/// Create the admin user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(show).put(update).delete(delete))
}
