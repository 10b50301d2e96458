//! News filter query shape tests.
//!
//! Exercise the public filter builder through the crate API and check
//! the SQL it produces, clause by clause. No database required.

#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use newsdesk_db::repositories::news::{NewsFilter, filter_query};
use sea_orm::{DbBackend, QueryTrait};

fn sql(filter: &NewsFilter) -> String {
    filter_query(filter).build(DbBackend::Postgres).to_string()
}

#[test]
fn default_filter_selects_everything() {
    let generated = sql(&NewsFilter::default());
    assert!(generated.starts_with("SELECT"));
    assert!(!generated.contains("WHERE"));
}

#[test]
fn all_clauses_compose_into_one_conjunction() {
    let filter = NewsFilter {
        author_id: Some("author1".to_string()),
        published: Some(true),
        start_date: Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap().into()),
        end_date: Some(Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap().into()),
        search_term: Some("election".to_string()),
        category_ids: vec!["cat1".to_string()],
        category_slug: Some("politics".to_string()),
        tag_ids: vec!["tag1".to_string()],
    };

    let generated = sql(&filter);

    assert!(generated.contains("\"news\".\"author_id\" = 'author1'"));
    assert!(generated.contains("\"news\".\"published\" = TRUE"));
    assert!(generated.contains("\"news\".\"pub_date\" >="));
    assert!(generated.contains("\"news\".\"pub_date\" <="));
    assert!(generated.contains("ILIKE '%election%'"));
    assert!(generated.contains("\"category_id\" = 'cat1'"));
    assert!(generated.contains("\"category\".\"slug\" = 'politics'"));
    assert!(generated.contains("\"tag_id\" IN ('tag1')"));
    assert!(generated.contains("ORDER BY \"news\".\"pub_date\" DESC"));
}

#[test]
fn unpublished_filter_is_distinct_from_absent_filter() {
    let drafts = NewsFilter {
        published: Some(false),
        ..NewsFilter::default()
    };
    assert!(sql(&drafts).contains("\"news\".\"published\" = FALSE"));

    let all = NewsFilter::default();
    assert!(!sql(&all).contains("published"));
}

#[test]
fn three_categories_yield_three_subqueries() {
    let filter = NewsFilter {
        category_ids: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        ..NewsFilter::default()
    };

    let generated = sql(&filter);
    assert_eq!(
        generated
            .matches("IN (SELECT \"news_id\" FROM \"news_category\"")
            .count(),
        3
    );
}

#[test]
fn search_is_case_insensitive_by_construction() {
    let filter = NewsFilter {
        search_term: Some("BREAKING".to_string()),
        ..NewsFilter::default()
    };

    // ILIKE carries the case folding; the term itself is untouched.
    let generated = sql(&filter);
    assert!(generated.contains("ILIKE '%BREAKING%'"));
    assert!(!generated.contains("LOWER("));
}
