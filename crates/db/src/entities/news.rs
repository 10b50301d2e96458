//! News article entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "news")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Unique URL key, derived from the title when not supplied
    #[sea_orm(unique, indexed)]
    pub slug: String,

    pub title: String,

    /// Plain-text teaser, derived from content when not supplied
    #[sea_orm(column_type = "Text")]
    pub summary: String,

    /// HTML body
    #[sea_orm(column_type = "Text")]
    pub content: String,

    /// Cover image URL (from the upload CDN, stored verbatim)
    #[sea_orm(nullable)]
    pub cover_image: Option<String>,

    /// Author user ID
    #[sea_orm(indexed)]
    pub author_id: String,

    /// Draft articles stay hidden from the public site
    #[sea_orm(default_value = false, indexed)]
    pub published: bool,

    /// Featured on category landing sections
    #[sea_orm(default_value = false)]
    pub is_featured: bool,

    /// Shown in the breaking-news strip
    #[sea_orm(default_value = false)]
    pub is_breaking_news: bool,

    /// Publication timestamp used for ordering and date filters
    #[sea_orm(indexed)]
    pub pub_date: DateTimeWithTimeZone,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id"
    )]
    Author,

    #[sea_orm(has_many = "super::news_category::Entity")]
    NewsCategories,

    #[sea_orm(has_many = "super::news_tag::Entity")]
    NewsTags,

    #[sea_orm(has_one = "super::seo::Entity")]
    Seo,

    #[sea_orm(has_one = "super::analytics::Entity")]
    Analytics,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        super::news_category::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::news_category::Relation::News.def().rev())
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::news_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::news_tag::Relation::News.def().rev())
    }
}

impl Related<super::seo::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seo.def()
    }
}

impl Related<super::analytics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Analytics.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
