//! Per-article analytics counters, one row per news article.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "analytics")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub news_id: String,

    #[sea_orm(default_value = 0)]
    pub views: i64,

    #[sea_orm(default_value = 0)]
    pub likes: i64,

    #[sea_orm(default_value = 0)]
    pub shares: i64,

    /// Accumulated read time in seconds
    #[sea_orm(default_value = 0)]
    pub read_duration: i64,
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
