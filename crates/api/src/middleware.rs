//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use newsdesk_core::{
    AdService, CategoryService, NewsService, PollService, SiteConfigService, SiteHealthService,
    TagService, UserService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub news_service: NewsService,
    pub poll_service: PollService,
    pub category_service: CategoryService,
    pub tag_service: TagService,
    pub ad_service: AdService,
    pub user_service: UserService,
    pub site_config_service: SiteConfigService,
    pub site_health_service: SiteHealthService,
}

/// Authentication middleware.
///
/// Resolves a bearer token into a user and stores it in the request
/// extensions; handlers decide through extractors whether auth is
/// required, optional, or admin-only.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(Some(user)) = state.user_service.find_by_token(token).await
    {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}
