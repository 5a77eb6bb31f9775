//! Monthly budget targets.
//!
//! A target is unique per (tag, period start, user). Setting it again deletes
//! the old row and inserts a new one.

use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{Money, Period};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub tag: String,
    pub amount: Money,
    pub period: Period,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "targets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i64,
    pub tag: String,
    pub amount_minor: i64,
    pub period_start: DateTimeUtc,
    pub period_end: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub(crate) fn new(user_id: i64, target: &Target) -> Self {
        Self {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(user_id),
            tag: ActiveValue::Set(target.tag.clone()),
            amount_minor: ActiveValue::Set(target.amount.cents()),
            period_start: ActiveValue::Set(target.period.start),
            period_end: ActiveValue::Set(target.period.end),
        }
    }
}

impl From<Model> for Target {
    fn from(model: Model) -> Self {
        Self {
            tag: model.tag,
            amount: Money::new(model.amount_minor),
            period: Period {
                start: model.period_start,
                end: model.period_end,
            },
        }
    }
}
