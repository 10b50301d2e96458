//! API endpoints.

pub mod admin;
mod ads;
mod news;
mod polls;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/news", news::router())
        .nest("/polls", polls::router())
        .nest("/ads", ads::router())
        .nest("/admin", admin::router())
}
