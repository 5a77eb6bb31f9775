//! SQL implementation of [`Storage`] on top of sea-orm.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveValue, DatabaseConnection, QueryFilter, QueryOrder, TransactionTrait,
    prelude::*,
    sea_query::{Expr, OnConflict},
};

use crate::{
    ConversationState, EngineError, Money, MoneyEvent, Period, ResultEngine, Storage, Target,
    feedback, money_events, outgoing_messages, tags, targets, usage_logs, users,
};

#[derive(Clone, Debug)]
pub struct Store {
    database: DatabaseConnection,
}

impl Store {
    /// Return a builder for `Store`. Help to build the struct.
    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }
}

#[async_trait]
impl Storage for Store {
    async fn create_user(&self, user_id: i64, name: &str) -> ResultEngine<()> {
        let user = users::ActiveModel {
            id: ActiveValue::Set(user_id),
            name: ActiveValue::Set(name.to_string()),
            state: ActiveValue::Set(ConversationState::Idle.token()),
            created: ActiveValue::Set(Utc::now()),
        };
        users::Entity::insert(user)
            .exec_without_returning(&self.database)
            .await?;
        Ok(())
    }

    async fn user_exists(&self, user_id: i64) -> ResultEngine<bool> {
        Ok(users::Entity::find_by_id(user_id)
            .one(&self.database)
            .await?
            .is_some())
    }

    async fn set_state(&self, user_id: i64, state: &ConversationState) -> ResultEngine<()> {
        let result = users::Entity::update_many()
            .col_expr(users::Column::State, Expr::value(state.token()))
            .filter(users::Column::Id.eq(user_id))
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::UnknownUser(user_id));
        }
        Ok(())
    }

    async fn state(&self, user_id: i64) -> ResultEngine<ConversationState> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.database)
            .await?
            .ok_or(EngineError::UnknownUser(user_id))?;
        Ok(ConversationState::parse(&user.state))
    }

    async fn upsert_target(
        &self,
        user_id: i64,
        tag: &str,
        amount: Money,
        period: Period,
    ) -> ResultEngine<()> {
        let target = Target {
            tag: tag.to_string(),
            amount,
            period,
        };

        let db_tx = self.database.begin().await?;
        targets::Entity::delete_many()
            .filter(targets::Column::UserId.eq(user_id))
            .filter(targets::Column::Tag.eq(tag))
            .filter(targets::Column::PeriodStart.eq(period.start))
            .exec(&db_tx)
            .await?;
        targets::Entity::insert(targets::ActiveModel::new(user_id, &target))
            .exec_without_returning(&db_tx)
            .await?;
        db_tx.commit().await?;
        Ok(())
    }

    async fn targets(&self, user_id: i64, period: Period) -> ResultEngine<Vec<Target>> {
        let models = targets::Entity::find()
            .filter(targets::Column::UserId.eq(user_id))
            .filter(targets::Column::PeriodStart.eq(period.start))
            .filter(targets::Column::PeriodEnd.eq(period.end))
            .order_by_asc(targets::Column::Tag)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Target::from).collect())
    }

    async fn create_money_event(&self, user_id: i64, event: &MoneyEvent) -> ResultEngine<()> {
        money_events::Entity::insert(money_events::ActiveModel::new(user_id, event))
            .exec_without_returning(&self.database)
            .await?;
        Ok(())
    }

    async fn money_events(&self, user_id: i64, period: Period) -> ResultEngine<Vec<MoneyEvent>> {
        money_events::Entity::find()
            .filter(money_events::Column::UserId.eq(user_id))
            .filter(money_events::Column::Created.gte(period.start))
            .filter(money_events::Column::Created.lt(period.end))
            .order_by_asc(money_events::Column::Created)
            .order_by_asc(money_events::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(MoneyEvent::try_from)
            .collect()
    }

    async fn add_tag(&self, user_id: i64, tag: &str) -> ResultEngine<()> {
        let model = tags::ActiveModel {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(user_id),
            tag: ActiveValue::Set(tag.to_string()),
        };
        tags::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([tags::Column::UserId, tags::Column::Tag])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.database)
            .await?;
        Ok(())
    }

    async fn remove_tag(&self, user_id: i64, tag: &str) -> ResultEngine<()> {
        tags::Entity::delete_many()
            .filter(tags::Column::UserId.eq(user_id))
            .filter(tags::Column::Tag.eq(tag))
            .exec(&self.database)
            .await?;
        Ok(())
    }

    async fn tags(&self, user_id: i64) -> ResultEngine<BTreeSet<String>> {
        Ok(tags::Entity::find()
            .filter(tags::Column::UserId.eq(user_id))
            .all(&self.database)
            .await?
            .into_iter()
            .map(|model| model.tag)
            .collect())
    }

    async fn save_feedback(&self, user_id: i64, text: &str) -> ResultEngine<()> {
        let model = feedback::ActiveModel {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(user_id),
            message: ActiveValue::Set(text.to_string()),
            created: ActiveValue::Set(Utc::now()),
        };
        feedback::Entity::insert(model)
            .exec_without_returning(&self.database)
            .await?;
        Ok(())
    }

    async fn save_visible_message(&self, user_id: i64, message_id: &str) -> ResultEngine<()> {
        let model = outgoing_messages::ActiveModel {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(user_id),
            message_id: ActiveValue::Set(message_id.to_string()),
        };
        outgoing_messages::Entity::insert(model)
            .exec_without_returning(&self.database)
            .await?;
        Ok(())
    }

    async fn visible_messages(&self, user_id: i64) -> ResultEngine<Vec<String>> {
        Ok(outgoing_messages::Entity::find()
            .filter(outgoing_messages::Column::UserId.eq(user_id))
            .order_by_asc(outgoing_messages::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(|model| model.message_id)
            .collect())
    }

    async fn clear_visible_messages(&self, user_id: i64) -> ResultEngine<()> {
        outgoing_messages::Entity::delete_many()
            .filter(outgoing_messages::Column::UserId.eq(user_id))
            .exec(&self.database)
            .await?;
        Ok(())
    }

    async fn record_usage(&self, user_id: i64, action: &str) -> ResultEngine<()> {
        let model = usage_logs::ActiveModel {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(user_id),
            action: ActiveValue::Set(action.to_string()),
            created: ActiveValue::Set(Utc::now()),
        };
        usage_logs::Entity::insert(model)
            .exec_without_returning(&self.database)
            .await?;
        Ok(())
    }
}

/// The builder for `Store`
#[derive(Default)]
pub struct StoreBuilder {
    database: DatabaseConnection,
}

impl StoreBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> StoreBuilder {
        self.database = db;
        self
    }

    /// Construct `Store`
    pub async fn build(self) -> ResultEngine<Store> {
        Ok(Store {
            database: self.database,
        })
    }
}
