//! Capabilities the conversation core consumes.
//!
//! [`Storage`] is implemented by [`Store`](crate::Store) on top of sea-orm;
//! [`Delivery`] is implemented by the messaging adapter.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::{
    ConversationState, Money, MoneyEvent, Period, Recipient, ReplyMessage, ResultEngine, Target,
};

#[async_trait]
pub trait Storage: Send + Sync {
    async fn create_user(&self, user_id: i64, name: &str) -> ResultEngine<()>;
    async fn user_exists(&self, user_id: i64) -> ResultEngine<bool>;
    /// Fails with [`UnknownUser`](crate::EngineError::UnknownUser) when the
    /// user was never created.
    async fn set_state(&self, user_id: i64, state: &ConversationState) -> ResultEngine<()>;
    async fn state(&self, user_id: i64) -> ResultEngine<ConversationState>;

    /// Replaces the target for the same tag and period start.
    async fn upsert_target(
        &self,
        user_id: i64,
        tag: &str,
        amount: Money,
        period: Period,
    ) -> ResultEngine<()>;
    async fn targets(&self, user_id: i64, period: Period) -> ResultEngine<Vec<Target>>;

    async fn create_money_event(&self, user_id: i64, event: &MoneyEvent) -> ResultEngine<()>;
    /// Events created inside `period`, oldest first.
    async fn money_events(&self, user_id: i64, period: Period) -> ResultEngine<Vec<MoneyEvent>>;

    async fn add_tag(&self, user_id: i64, tag: &str) -> ResultEngine<()>;
    async fn remove_tag(&self, user_id: i64, tag: &str) -> ResultEngine<()>;
    async fn tags(&self, user_id: i64) -> ResultEngine<BTreeSet<String>>;

    async fn save_feedback(&self, user_id: i64, text: &str) -> ResultEngine<()>;

    async fn save_visible_message(&self, user_id: i64, message_id: &str) -> ResultEngine<()>;
    async fn visible_messages(&self, user_id: i64) -> ResultEngine<Vec<String>>;
    async fn clear_visible_messages(&self, user_id: i64) -> ResultEngine<()>;

    async fn record_usage(&self, user_id: i64, action: &str) -> ResultEngine<()>;
}

#[async_trait]
pub trait Delivery: Send + Sync {
    /// Sends one message and returns the identifier it got in the chat.
    async fn send(&self, recipient: &Recipient, message: &ReplyMessage) -> ResultEngine<String>;
    async fn delete(&self, recipient: &Recipient, message_id: &str) -> ResultEngine<()>;
}
