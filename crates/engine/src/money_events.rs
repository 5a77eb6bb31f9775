//! Recorded expenses.
//!
//! Money events are append-only: statistics always re-aggregate them over a
//! period instead of keeping running totals.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{Currency, EngineError, Money};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoneyEvent {
    pub amount: Money,
    pub currency: Currency,
    pub comment: String,
    pub tag: String,
    pub created: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "money_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i64,
    pub amount_minor: i64,
    pub currency: String,
    pub comment: String,
    pub tag: String,
    pub created: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub(crate) fn new(user_id: i64, event: &MoneyEvent) -> Self {
        Self {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(user_id),
            amount_minor: ActiveValue::Set(event.amount.cents()),
            currency: ActiveValue::Set(event.currency.code().to_string()),
            comment: ActiveValue::Set(event.comment.clone()),
            tag: ActiveValue::Set(event.tag.clone()),
            created: ActiveValue::Set(event.created),
        }
    }
}

impl TryFrom<Model> for MoneyEvent {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: Money::new(model.amount_minor),
            currency: Currency::try_from(model.currency.as_str())?,
            comment: model.comment,
            tag: model.tag,
            created: model.created,
        })
    }
}
