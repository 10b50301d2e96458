//! API integration tests.
//!
//! These tests verify the API endpoints work correctly together.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::redundant_clone)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use newsdesk_api::{middleware::AppState, router as api_router};
use newsdesk_core::{
    AdService, CategoryService, NewsService, PollService, SiteConfigService, SiteHealthService,
    TagService, UserService,
};
use newsdesk_db::entities::{news, poll};
use newsdesk_db::repositories::{
    AdRepository, CategoryRepository, NewsRepository, PollOptionRepository, PollRepository,
    PollVoteRepository, SiteConfigurationRepository, TagRepository, UserRepository,
};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use std::sync::Arc;
use tower::ServiceExt;

/// Create test app state over the given mock connection.
fn create_test_state(db: DatabaseConnection) -> AppState {
    let db = Arc::new(db);

    let user_repo = UserRepository::new(Arc::clone(&db));
    let news_repo = NewsRepository::new(Arc::clone(&db));
    let category_repo = CategoryRepository::new(Arc::clone(&db));
    let tag_repo = TagRepository::new(Arc::clone(&db));
    let ad_repo = AdRepository::new(Arc::clone(&db));
    let poll_repo = PollRepository::new(Arc::clone(&db));
    let poll_option_repo = PollOptionRepository::new(Arc::clone(&db));
    let poll_vote_repo = PollVoteRepository::new(Arc::clone(&db));
    let site_config_repo = SiteConfigurationRepository::new(Arc::clone(&db));

    AppState {
        news_service: NewsService::new(news_repo.clone()),
        poll_service: PollService::new(poll_repo, poll_option_repo, poll_vote_repo),
        category_service: CategoryService::new(category_repo.clone()),
        tag_service: TagService::new(tag_repo),
        ad_service: AdService::new(ad_repo),
        user_service: UserService::new(user_repo),
        site_config_service: SiteConfigService::new(
            site_config_repo.clone(),
            category_repo.clone(),
        ),
        site_health_service: SiteHealthService::new(news_repo, category_repo, site_config_repo),
    }
}

/// Create the test router over an empty mock database.
fn create_test_router() -> Router {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    api_router().with_state(create_test_state(db))
}

#[tokio::test]
async fn test_unknown_endpoint_returns_404() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/nonexistent/endpoint")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_news_list_returns_empty_page() {
    // One count query, one page query.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            maplit::btreemap! { "num_items" => sea_orm::Value::BigInt(Some(0)) },
        ]])
        .append_query_results([Vec::<news::Model>::new()])
        .into_connection();
    let app = api_router().with_state(create_test_state(db));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/news")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_news_detail_for_unknown_slug_returns_404() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<news::Model>::new()])
        .into_connection();
    let app = api_router().with_state(create_test_state(db));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/news/no-such-article")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_active_polls_returns_empty_list() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<poll::Model>::new()])
        .into_connection();
    let app = api_router().with_state(create_test_state(db));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/polls")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_winner_for_unknown_poll_returns_404() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<poll::Model>::new()])
        .into_connection();
    let app = api_router().with_state(create_test_state(db));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/polls/p_missing/winner")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_vote_without_auth_returns_401() {
    let app = create_test_router();

    // The auth middleware is layered in the server binary; without it no
    // user lands in the request extensions, so AuthUser must reject.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/polls/p1/vote")
                .method("POST")
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"optionId":"o1"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_endpoints_without_auth_return_401() {
    for uri in ["/admin/users", "/admin/ads", "/admin/health"] {
        let app = create_test_router();

        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .method("GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn test_ads_without_placement_returns_400() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/ads")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_news_with_invalid_json_returns_error() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/admin/news")
                .method("POST")
                .header("Content-Type", "application/json")
                .body(Body::from("invalid json"))
                .unwrap(),
        )
        .await
        .unwrap();

    // Rejected before the body parse by the missing auth, or by Json.
    assert!(
        response.status() == StatusCode::UNAUTHORIZED
            || response.status() == StatusCode::BAD_REQUEST
    );
}
