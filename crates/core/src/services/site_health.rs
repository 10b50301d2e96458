//! Content-health scoring.
//!
//! Grades the published content against the navigation key categories:
//! three checks per category plus one global breaking-news check. The
//! scoring itself is pure; the service only gathers counts.

use chrono::{Duration, Utc};
use newsdesk_common::{AppError, AppResult, IdGenerator};
use newsdesk_db::repositories::{CategoryRepository, NewsRepository, SiteConfigurationRepository};
use serde::Serialize;

/// Days a category counts as recently served.
const RECENT_WINDOW_DAYS: i64 = 7;

/// Minimum published articles per key category.
const MIN_ARTICLES_PER_CATEGORY: u64 = 3;

/// Per-category published-content counts.
#[derive(Debug, Clone)]
pub struct CategoryCounts {
    pub name: String,
    pub featured: u64,
    pub recent: u64,
    pub total: u64,
}

/// Content-health report for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// 0..=100, rounded to two decimals.
    pub health_percentage: f64,
    pub issues: Vec<String>,
    pub category_count: usize,
    pub has_breaking_news: bool,
}

/// Issue strings for one category's counts.
#[must_use]
pub fn category_issues(counts: &CategoryCounts) -> Vec<String> {
    let mut issues = Vec::new();

    if counts.featured == 0 {
        issues.push(format!("No featured article in category '{}'", counts.name));
    }
    if counts.recent == 0 {
        issues.push(format!(
            "No article published in the last {RECENT_WINDOW_DAYS} days in category '{}'",
            counts.name
        ));
    }
    if counts.total < MIN_ARTICLES_PER_CATEGORY {
        issues.push(format!(
            "Fewer than {MIN_ARTICLES_PER_CATEGORY} published articles in category '{}'",
            counts.name
        ));
    }

    issues
}

/// Health percentage from the issue total: each key category contributes
/// three checks, plus the one global breaking-news check.
#[must_use]
pub fn health_percentage(total_issues: usize, category_count: usize) -> f64 {
    let total_checks = category_count * 3 + 1;
    let raw = 100.0 - (total_issues as f64 / total_checks as f64) * 100.0;
    (raw * 100.0).round() / 100.0
}

/// Site health service: gathers counts and delegates to the pure scorers.
#[derive(Clone)]
pub struct SiteHealthService {
    news_repo: NewsRepository,
    category_repo: CategoryRepository,
    config_repo: SiteConfigurationRepository,
    id_gen: IdGenerator,
}

impl SiteHealthService {
    /// Create a new site health service.
    #[must_use]
    pub const fn new(
        news_repo: NewsRepository,
        category_repo: CategoryRepository,
        config_repo: SiteConfigurationRepository,
    ) -> Self {
        Self {
            news_repo,
            category_repo,
            config_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Build the content-health report over the navigation key categories.
    pub async fn report(&self) -> AppResult<HealthReport> {
        let config = self.config_repo.get_or_create(&self.id_gen).await?;
        let key_ids: Vec<String> = serde_json::from_value(config.nav_bar_key_categories)
            .map_err(|e| AppError::Internal(format!("Invalid navigation configuration: {e}")))?;

        let categories = self.category_repo.find_by_ids(&key_ids).await?;
        let since = (Utc::now() - Duration::days(RECENT_WINDOW_DAYS)).into();

        let mut issues = Vec::new();
        for category in &categories {
            let counts = CategoryCounts {
                name: category.name.clone(),
                featured: self.news_repo.count_featured_in_category(&category.id).await?,
                recent: self
                    .news_repo
                    .count_recent_in_category(&category.id, since)
                    .await?,
                total: self.news_repo.count_published_in_category(&category.id).await?,
            };
            issues.extend(category_issues(&counts));
        }

        let has_breaking_news = self.news_repo.has_breaking_news().await?;
        if !has_breaking_news {
            issues.push("No breaking news is currently published".to_string());
        }

        Ok(HealthReport {
            health_percentage: health_percentage(issues.len(), categories.len()),
            issues,
            category_count: categories.len(),
            has_breaking_news,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn counts(name: &str, featured: u64, recent: u64, total: u64) -> CategoryCounts {
        CategoryCounts {
            name: name.to_string(),
            featured,
            recent,
            total,
        }
    }

    #[test]
    fn test_healthy_category_has_no_issues() {
        assert!(category_issues(&counts("Politics", 1, 2, 5)).is_empty());
    }

    #[test]
    fn test_empty_category_fails_all_three_checks() {
        assert_eq!(category_issues(&counts("Sports", 0, 0, 0)).len(), 3);
    }

    #[test]
    fn test_two_articles_still_below_minimum() {
        let issues = category_issues(&counts("Culture", 1, 1, 2));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("Fewer than 3"));
    }

    #[test]
    fn test_score_one_healthy_one_empty_category() {
        // One category passes everything, one fails all three checks,
        // breaking news present: 3 issues out of 7 checks.
        let score = health_percentage(3, 2);
        assert_eq!(score, 57.14);
    }

    #[test]
    fn test_score_boundaries() {
        assert_eq!(health_percentage(0, 2), 100.0);
        assert_eq!(health_percentage(7, 2), 0.0);
        // No key categories: only the breaking-news check exists.
        assert_eq!(health_percentage(1, 0), 0.0);
        assert_eq!(health_percentage(0, 0), 100.0);
    }
}
