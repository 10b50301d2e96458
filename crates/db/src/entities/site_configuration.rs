//! Site configuration entity.
//!
//! Exactly one row exists; access goes through the repository's
//! `get_or_create` accessor rather than a hardcoded primary key.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "site_configuration")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Ordered category IDs shown in the primary navigation bar (max 5)
    #[sea_orm(column_type = "JsonBinary")]
    pub nav_bar_key_categories: Json,

    /// Ordered category IDs shown in the secondary navigation bar
    #[sea_orm(column_type = "JsonBinary")]
    pub nav_bar_sub_categories: Json,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
