//! Back-office endpoints. Every handler requires an admin user.

mod ads;
mod categories;
mod news;
mod polls;
mod site;
mod tags;
mod users;

use axum::Router;

use crate::middleware::AppState;

/// Create the admin router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/news", news::router())
        .nest("/categories", categories::router())
        .nest("/tags", tags::router())
        .nest("/ads", ads::router())
        .nest("/polls", polls::router())
        .nest("/users", users::router())
        .merge(site::router())
}
