//! News repository and filter query builder.

use std::sync::Arc;

use crate::entities::{
    Analytics, Category, News, NewsCategory, NewsTag, Seo, Tag, analytics, category, news,
    news_category, news_tag, seo, tag,
};
use newsdesk_common::{AppError, AppResult, Page};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Select, Set,
    sea_query::{Expr, OnConflict, Query, SimpleExpr, extension::postgres::PgExpr},
};

/// Conjunctive filter over the news collection.
///
/// Each populated field contributes one clause; all clauses are combined
/// with AND at the top level. Category IDs use AND semantics (the article
/// must belong to every listed category), tag IDs use OR semantics (any
/// listed tag matches). The asymmetry is intentional.
#[derive(Debug, Clone, Default)]
pub struct NewsFilter {
    /// Exact author match.
    pub author_id: Option<String>,
    /// Tri-state published filter; no clause when `None`.
    pub published: Option<bool>,
    /// Inclusive lower bound on `pub_date`.
    pub start_date: Option<sea_orm::prelude::DateTimeWithTimeZone>,
    /// Inclusive upper bound on `pub_date`.
    pub end_date: Option<sea_orm::prelude::DateTimeWithTimeZone>,
    /// Case-insensitive substring, matched against title, summary, or content.
    pub search_term: Option<String>,
    /// Article must belong to every listed category.
    pub category_ids: Vec<String>,
    /// Article must belong to a category with this slug.
    pub category_slug: Option<String>,
    /// Article must carry at least one of the listed tags.
    pub tag_ids: Vec<String>,
}

/// Escape LIKE wildcards in a user-supplied search term.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Membership clause: news id appears in the junction rows for `category_id`.
fn in_category(category_id: &str) -> SimpleExpr {
    news::Column::Id.in_subquery(
        Query::select()
            .column(news_category::Column::NewsId)
            .from(NewsCategory)
            .and_where(news_category::Column::CategoryId.eq(category_id))
            .to_owned(),
    )
}

/// Membership clause through the category slug.
fn in_category_with_slug(slug: &str) -> SimpleExpr {
    news::Column::Id.in_subquery(
        Query::select()
            .column(news_category::Column::NewsId)
            .from(NewsCategory)
            .inner_join(
                Category,
                Expr::col((Category, category::Column::Id))
                    .equals((NewsCategory, news_category::Column::CategoryId)),
            )
            .and_where(Expr::col((Category, category::Column::Slug)).eq(slug))
            .to_owned(),
    )
}

/// Membership clause: news id carries any of the listed tags.
fn with_any_tag(tag_ids: &[String]) -> SimpleExpr {
    news::Column::Id.in_subquery(
        Query::select()
            .column(news_tag::Column::NewsId)
            .from(NewsTag)
            .and_where(news_tag::Column::TagId.is_in(tag_ids.iter().cloned()))
            .to_owned(),
    )
}

/// Build the conjunctive predicate for a [`NewsFilter`].
///
/// Pure function so each clause's semantics can be audited in isolation.
#[must_use]
pub fn filter_condition(filter: &NewsFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(ref author_id) = filter.author_id {
        condition = condition.add(news::Column::AuthorId.eq(author_id));
    }

    if let Some(published) = filter.published {
        condition = condition.add(news::Column::Published.eq(published));
    }

    if let Some(start) = filter.start_date {
        condition = condition.add(news::Column::PubDate.gte(start));
    }

    if let Some(end) = filter.end_date {
        condition = condition.add(news::Column::PubDate.lte(end));
    }

    if let Some(ref term) = filter.search_term {
        let pattern = format!("%{}%", escape_like(term));
        condition = condition.add(
            Condition::any()
                .add(Expr::col(news::Column::Title).ilike(pattern.clone()))
                .add(Expr::col(news::Column::Summary).ilike(pattern.clone()))
                .add(Expr::col(news::Column::Content).ilike(pattern)),
        );
    }

    // AND semantics: one independent membership clause per category id.
    for category_id in &filter.category_ids {
        condition = condition.add(in_category(category_id));
    }

    if let Some(ref slug) = filter.category_slug {
        condition = condition.add(in_category_with_slug(slug));
    }

    // OR semantics: a single any-of clause for tags.
    if !filter.tag_ids.is_empty() {
        condition = condition.add(with_any_tag(&filter.tag_ids));
    }

    condition
}

/// Filtered listing query, newest publication first.
#[must_use]
pub fn filter_query(filter: &NewsFilter) -> Select<News> {
    News::find()
        .filter(filter_condition(filter))
        .order_by_desc(news::Column::PubDate)
}

/// News repository for database operations.
#[derive(Clone)]
pub struct NewsRepository {
    db: Arc<DatabaseConnection>,
}

impl NewsRepository {
    /// Create a new news repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an article by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<news::Model>> {
        News::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an article by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<news::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NewsNotFound(id.to_string()))
    }

    /// Find an article by slug.
    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<news::Model>> {
        News::find()
            .filter(news::Column::Slug.eq(slug))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an article by slug, returning an error if not found.
    pub async fn get_by_slug(&self, slug: &str) -> AppResult<news::Model> {
        self.find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NewsNotFound(slug.to_string()))
    }

    /// Create a new article.
    pub async fn create(&self, model: news::ActiveModel) -> AppResult<news::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an article.
    pub async fn update(&self, model: news::ActiveModel) -> AppResult<news::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete an article (junctions, seo and analytics rows cascade).
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        News::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Page through articles matching `filter`, ordered by `pub_date`
    /// descending. `page` is 1-based. A filter matching zero rows yields
    /// an empty page with valid metadata, not an error.
    pub async fn list_with_filters(
        &self,
        filter: &NewsFilter,
        page: u64,
        limit: u64,
    ) -> AppResult<Page<news::Model>> {
        let page = page.max(1);
        let limit = limit.max(1);

        let paginator = filter_query(filter).paginate(self.db.as_ref(), limit);

        let total_count = paginator
            .num_items()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        // fetch_page is 0-based; pages past the end come back empty.
        let data = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(Page::new(data, page, limit, total_count))
    }

    // ==================== Associations ====================

    /// Replace the full category set for an article.
    pub async fn set_categories(&self, news_id: &str, category_ids: &[String]) -> AppResult<()> {
        NewsCategory::delete_many()
            .filter(news_category::Column::NewsId.eq(news_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if category_ids.is_empty() {
            return Ok(());
        }

        let rows = category_ids.iter().map(|category_id| news_category::ActiveModel {
            news_id: Set(news_id.to_string()),
            category_id: Set(category_id.clone()),
        });

        NewsCategory::insert_many(rows)
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Replace the full tag set for an article.
    pub async fn set_tags(&self, news_id: &str, tag_ids: &[String]) -> AppResult<()> {
        NewsTag::delete_many()
            .filter(news_tag::Column::NewsId.eq(news_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if tag_ids.is_empty() {
            return Ok(());
        }

        let rows = tag_ids.iter().map(|tag_id| news_tag::ActiveModel {
            news_id: Set(news_id.to_string()),
            tag_id: Set(tag_id.clone()),
        });

        NewsTag::insert_many(rows)
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Categories attached to an article.
    pub async fn categories_of(&self, news_id: &str) -> AppResult<Vec<category::Model>> {
        Category::find()
            .filter(
                category::Column::Id.in_subquery(
                    Query::select()
                        .column(news_category::Column::CategoryId)
                        .from(NewsCategory)
                        .and_where(news_category::Column::NewsId.eq(news_id))
                        .to_owned(),
                ),
            )
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Tags attached to an article.
    pub async fn tags_of(&self, news_id: &str) -> AppResult<Vec<tag::Model>> {
        Tag::find()
            .filter(
                tag::Column::Id.in_subquery(
                    Query::select()
                        .column(news_tag::Column::TagId)
                        .from(NewsTag)
                        .and_where(news_tag::Column::NewsId.eq(news_id))
                        .to_owned(),
                ),
            )
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ==================== Seo & Analytics ====================

    /// Ensure an analytics row exists for a new article.
    pub async fn init_analytics(&self, news_id: &str) -> AppResult<()> {
        let model = analytics::ActiveModel {
            news_id: Set(news_id.to_string()),
            views: Set(0),
            likes: Set(0),
            shares: Set(0),
            read_duration: Set(0),
        };

        Analytics::insert(model)
            .on_conflict(
                OnConflict::column(analytics::Column::NewsId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Analytics counters for an article.
    pub async fn find_analytics(&self, news_id: &str) -> AppResult<Option<analytics::Model>> {
        Analytics::find_by_id(news_id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Increment view count atomically (single UPDATE query, no fetch).
    pub async fn increment_views(&self, news_id: &str) -> AppResult<()> {
        Analytics::update_many()
            .col_expr(
                analytics::Column::Views,
                Expr::col(analytics::Column::Views).add(1),
            )
            .filter(analytics::Column::NewsId.eq(news_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Upsert the SEO image row for an article.
    pub async fn set_seo_images(
        &self,
        news_id: &str,
        open_graph_image: Option<String>,
        twitter_image: Option<String>,
    ) -> AppResult<()> {
        let model = seo::ActiveModel {
            news_id: Set(news_id.to_string()),
            open_graph_image: Set(open_graph_image),
            twitter_image: Set(twitter_image),
        };

        Seo::insert(model)
            .on_conflict(
                OnConflict::column(seo::Column::NewsId)
                    .update_columns([seo::Column::OpenGraphImage, seo::Column::TwitterImage])
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// SEO image row for an article.
    pub async fn find_seo(&self, news_id: &str) -> AppResult<Option<seo::Model>> {
        Seo::find_by_id(news_id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ==================== Content-health counts ====================

    /// Published articles in a category.
    pub async fn count_published_in_category(&self, category_id: &str) -> AppResult<u64> {
        News::find()
            .filter(news::Column::Published.eq(true))
            .filter(in_category(category_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Published featured articles in a category.
    pub async fn count_featured_in_category(&self, category_id: &str) -> AppResult<u64> {
        News::find()
            .filter(news::Column::Published.eq(true))
            .filter(news::Column::IsFeatured.eq(true))
            .filter(in_category(category_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Published articles in a category with `pub_date >= since`.
    pub async fn count_recent_in_category(
        &self,
        category_id: &str,
        since: sea_orm::prelude::DateTimeWithTimeZone,
    ) -> AppResult<u64> {
        News::find()
            .filter(news::Column::Published.eq(true))
            .filter(news::Column::PubDate.gte(since))
            .filter(in_category(category_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Whether any published breaking-news article exists.
    pub async fn has_breaking_news(&self) -> AppResult<bool> {
        let count = News::find()
            .filter(news::Column::Published.eq(true))
            .filter(news::Column::IsBreakingNews.eq(true))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(count > 0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, DbBackend, MockDatabase, QueryTrait};

    fn create_test_news(id: &str, slug: &str, title: &str) -> news::Model {
        news::Model {
            id: id.to_string(),
            slug: slug.to_string(),
            title: title.to_string(),
            summary: "Summary".to_string(),
            content: "<p>Body</p>".to_string(),
            cover_image: None,
            author_id: "author1".to_string(),
            published: true,
            is_featured: false,
            is_breaking_news: false,
            pub_date: Utc::now().into(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn filter_sql(filter: &NewsFilter) -> String {
        filter_query(filter).build(DbBackend::Postgres).to_string()
    }

    #[test]
    fn test_empty_filter_has_no_clauses() {
        let sql = filter_sql(&NewsFilter::default());
        assert!(!sql.contains("WHERE"));
        assert!(sql.contains("ORDER BY \"news\".\"pub_date\" DESC"));
    }

    #[test]
    fn test_author_and_published_clauses() {
        let filter = NewsFilter {
            author_id: Some("author1".to_string()),
            published: Some(true),
            ..NewsFilter::default()
        };
        let sql = filter_sql(&filter);
        assert!(sql.contains("\"news\".\"author_id\" = 'author1'"));
        assert!(sql.contains("\"news\".\"published\" = TRUE"));
    }

    #[test]
    fn test_search_term_ors_across_three_columns() {
        let filter = NewsFilter {
            search_term: Some("markets".to_string()),
            ..NewsFilter::default()
        };
        let sql = filter_sql(&filter);
        assert!(sql.contains("\"title\" ILIKE '%markets%'"));
        assert!(sql.contains("\"summary\" ILIKE '%markets%'"));
        assert!(sql.contains("\"content\" ILIKE '%markets%'"));
        assert!(sql.contains(" OR "));
    }

    #[test]
    fn test_search_term_escapes_wildcards() {
        let filter = NewsFilter {
            search_term: Some("100%_done".to_string()),
            ..NewsFilter::default()
        };
        let sql = filter_sql(&filter);
        assert!(sql.contains("\\%"));
        assert!(sql.contains("\\_"));
    }

    #[test]
    fn test_category_ids_use_and_semantics() {
        // Two category ids must produce two independent membership
        // subqueries, both ANDed: "has all of these categories".
        let filter = NewsFilter {
            category_ids: vec!["cat-a".to_string(), "cat-b".to_string()],
            ..NewsFilter::default()
        };
        let sql = filter_sql(&filter);
        assert_eq!(sql.matches("IN (SELECT \"news_id\" FROM \"news_category\"").count(), 2);
        assert!(sql.contains("\"category_id\" = 'cat-a'"));
        assert!(sql.contains("\"category_id\" = 'cat-b'"));
        assert!(sql.contains(") AND "));
    }

    #[test]
    fn test_tag_ids_use_or_semantics() {
        // Tag ids collapse into a single IN-list membership subquery.
        let filter = NewsFilter {
            tag_ids: vec!["tag-x".to_string(), "tag-y".to_string()],
            ..NewsFilter::default()
        };
        let sql = filter_sql(&filter);
        assert_eq!(sql.matches("IN (SELECT \"news_id\" FROM \"news_tag\"").count(), 1);
        assert!(sql.contains("\"tag_id\" IN ('tag-x', 'tag-y')"));
    }

    #[test]
    fn test_category_slug_composes_with_category_ids() {
        let filter = NewsFilter {
            category_ids: vec!["cat-a".to_string()],
            category_slug: Some("politics".to_string()),
            ..NewsFilter::default()
        };
        let sql = filter_sql(&filter);
        assert!(sql.contains("\"category_id\" = 'cat-a'"));
        assert!(sql.contains("\"category\".\"slug\" = 'politics'"));
    }

    #[test]
    fn test_open_ended_date_range() {
        let start = Utc::now().into();
        let filter = NewsFilter {
            start_date: Some(start),
            ..NewsFilter::default()
        };
        let sql = filter_sql(&filter);
        assert!(sql.contains("\"news\".\"pub_date\" >="));
        assert!(!sql.contains("\"news\".\"pub_date\" <="));
    }

    #[tokio::test]
    async fn test_find_by_slug_found() {
        let article = create_test_news("n1", "hello-world", "Hello World");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[article.clone()]])
                .into_connection(),
        );

        let repo = NewsRepository::new(db);
        let result = repo.find_by_slug("hello-world").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().title, "Hello World");
    }

    #[tokio::test]
    async fn test_get_by_slug_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<news::Model>::new()])
                .into_connection(),
        );

        let repo = NewsRepository::new(db);
        let result = repo.get_by_slug("missing").await;

        match result {
            Err(AppError::NewsNotFound(slug)) => assert_eq!(slug, "missing"),
            _ => panic!("Expected NewsNotFound error"),
        }
    }
}
