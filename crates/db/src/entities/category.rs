//! Category entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    /// URL key for category pages
    #[sea_orm(unique, indexed)]
    pub slug: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::news_category::Entity")]
    NewsCategories,
}

impl Related<super::news::Entity> for Entity {
    fn to() -> RelationDef {
        super::news_category::Relation::News.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::news_category::Relation::Category.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
