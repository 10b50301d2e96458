//! User entity.
//!
//! Identity itself comes from the external auth provider; this table keeps
//! the local attributes attached to a provider-issued session token.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Unique handle
    #[sea_orm(unique)]
    pub username: String,

    /// Display name shown on bylines
    #[sea_orm(nullable)]
    pub display_name: Option<String>,

    pub email: String,

    /// Opaque session token issued by the auth provider
    #[sea_orm(nullable, unique)]
    pub token: Option<String>,

    /// Whether this user may access the admin back office
    #[sea_orm(default_value = false)]
    pub is_admin: bool,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::news::Entity")]
    News,

    #[sea_orm(has_many = "super::poll_vote::Entity")]
    PollVotes,
}

impl Related<super::news::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::News.def()
    }
}

impl Related<super::poll_vote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PollVotes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
