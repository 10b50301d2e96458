//! SEO metadata entity, one row per news article.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "seo")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub news_id: String,

    /// Open Graph share image URL
    #[sea_orm(nullable)]
    pub open_graph_image: Option<String>,

    /// Twitter card image URL
    #[sea_orm(nullable)]
    pub twitter_image: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::news::Entity",
        from = "Column::NewsId",
        to = "super::news::Column::Id",
        on_delete = "Cascade"
    )]
    News,
}

impl Related<super::news::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::News.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
