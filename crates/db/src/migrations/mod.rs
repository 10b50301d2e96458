//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250101_000001_create_user_table;
mod m20250101_000002_create_category_table;
mod m20250101_000003_create_tag_table;
mod m20250101_000004_create_news_table;
mod m20250101_000005_create_news_category_table;
mod m20250101_000006_create_news_tag_table;
mod m20250101_000007_create_seo_table;
mod m20250101_000008_create_analytics_table;
mod m20250101_000009_create_poll_table;
mod m20250101_000010_create_poll_option_table;
mod m20250101_000011_create_poll_vote_table;
mod m20250101_000012_create_ad_table;
mod m20250101_000013_create_site_configuration_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_user_table::Migration),
            Box::new(m20250101_000002_create_category_table::Migration),
            Box::new(m20250101_000003_create_tag_table::Migration),
            Box::new(m20250101_000004_create_news_table::Migration),
            Box::new(m20250101_000005_create_news_category_table::Migration),
            Box::new(m20250101_000006_create_news_tag_table::Migration),
            Box::new(m20250101_000007_create_seo_table::Migration),
            Box::new(m20250101_000008_create_analytics_table::Migration),
            Box::new(m20250101_000009_create_poll_table::Migration),
            Box::new(m20250101_000010_create_poll_option_table::Migration),
            Box::new(m20250101_000011_create_poll_vote_table::Migration),
            Box::new(m20250101_000012_create_ad_table::Migration),
            Box::new(m20250101_000013_create_site_configuration_table::Migration),
        ]
    }
}
