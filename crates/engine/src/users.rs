//! Users table.
//!
//! The id is the messenger's numeric user id; `state` holds the encoded
//! [`ConversationState`](crate::ConversationState).

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub name: String,
    pub state: String,
    pub created: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::tags::Entity")]
    Tags,
    #[sea_orm(has_many = "super::money_events::Entity")]
    MoneyEvents,
}

impl Related<super::tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tags.def()
    }
}

impl Related<super::money_events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MoneyEvents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
