//! Admin site configuration and content-health endpoints.

use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use newsdesk_common::AppResult;
use newsdesk_core::site_config::UpdateSiteConfigInput;
use newsdesk_core::site_health::HealthReport;
use newsdesk_db::entities::site_configuration;

use crate::{extractors::AdminUser, middleware::AppState, response::ApiResponse};

/// The navigation configuration.
async fn show_config(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<site_configuration::Model>> {
    Ok(ApiResponse::ok(state.site_config_service.get().await?))
}

/// Update the navigation configuration.
async fn update_config(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateSiteConfigInput>,
) -> AppResult<ApiResponse<site_configuration::Model>> {
    Ok(ApiResponse::ok(state.site_config_service.update(input).await?))
}

/// The content-health report for the dashboard.
async fn health(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<HealthReport>> {
    Ok(ApiResponse::ok(state.site_health_service.report().await?))
}

/// Create the site configuration router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/site-config", get(show_config).put(update_config))
        .route("/health", get(health))
}
