//! Newsdesk-rs server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, middleware};
use newsdesk_api::{middleware::AppState, router as api_router};
use newsdesk_common::Config;
use newsdesk_core::{
    AdService, CategoryService, NewsService, PollService, SiteConfigService, SiteHealthService,
    TagService, UserService,
};
use newsdesk_db::repositories::{
    AdRepository, CategoryRepository, NewsRepository, PollOptionRepository, PollRepository,
    PollVoteRepository, SiteConfigurationRepository, TagRepository, UserRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Socket address from the configured host and port.
fn bind_addr(host: &str, port: u16) -> Result<SocketAddr, std::net::AddrParseError> {
    Ok(SocketAddr::new(host.parse()?, port))
}

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newsdesk=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting newsdesk-rs server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = newsdesk_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    newsdesk_db::migrate(&db).await?;
    info!("Migrations completed");

    let db = Arc::new(db);

    // Initialize repositories
    let user_repo = UserRepository::new(Arc::clone(&db));
    let news_repo = NewsRepository::new(Arc::clone(&db));
    let category_repo = CategoryRepository::new(Arc::clone(&db));
    let tag_repo = TagRepository::new(Arc::clone(&db));
    let ad_repo = AdRepository::new(Arc::clone(&db));
    let poll_repo = PollRepository::new(Arc::clone(&db));
    let poll_option_repo = PollOptionRepository::new(Arc::clone(&db));
    let poll_vote_repo = PollVoteRepository::new(Arc::clone(&db));
    let site_config_repo = SiteConfigurationRepository::new(Arc::clone(&db));

    // Initialize services
    let news_service = NewsService::new(news_repo.clone());
    let poll_service = PollService::new(poll_repo, poll_option_repo, poll_vote_repo);
    let category_service = CategoryService::new(category_repo.clone());
    let tag_service = TagService::new(tag_repo);
    let ad_service = AdService::new(ad_repo);
    let user_service = UserService::new(user_repo);
    let site_config_service =
        SiteConfigService::new(site_config_repo.clone(), category_repo.clone());
    let site_health_service = SiteHealthService::new(news_repo, category_repo, site_config_repo);

    let state = AppState {
        news_service,
        poll_service,
        category_service,
        tag_service,
        ad_service,
        user_service,
        site_config_service,
        site_health_service,
    };

    // Build the router
    let app = Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            newsdesk_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = bind_addr(&config.server.host, config.server.port)?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr_uses_configured_host() {
        let addr = bind_addr("127.0.0.1", 8080).unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:8080");

        let addr = bind_addr("0.0.0.0", 3000).unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_bind_addr_rejects_a_hostname() {
        assert!(bind_addr("localhost", 3000).is_err());
    }
}
