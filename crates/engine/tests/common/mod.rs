#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicU64, Ordering},
};

use async_trait::async_trait;
use chrono::Utc;
use chrono_tz::UTC;
use sea_orm::{Database, DatabaseConnection};

use engine::{
    Assistant, Command, ConversationState, Delivery, EngineError, Period, Recipient, Reply,
    ReplyMessage, Signal, Storage, Store,
};
use migration::MigratorTrait;

/// Delivery double that records every call.
#[derive(Default)]
pub struct FakeDelivery {
    sent: Mutex<Vec<(String, ReplyMessage)>>,
    deleted: Mutex<Vec<String>>,
    next_id: AtomicU64,
    fail_sends_after: Mutex<Option<usize>>,
    fail_deletes: AtomicBool,
}

impl FakeDelivery {
    pub fn sent_ids(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|(id, _)| id.clone()).collect()
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, message)| message.text.clone())
            .collect()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    /// Every send after the first `count` ones fails.
    pub fn fail_sends_after(&self, count: usize) {
        *self.fail_sends_after.lock().unwrap() = Some(count);
    }

    pub fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Delivery for FakeDelivery {
    async fn send(
        &self,
        _recipient: &Recipient,
        message: &ReplyMessage,
    ) -> Result<String, EngineError> {
        let mut sent = self.sent.lock().unwrap();
        if let Some(limit) = *self.fail_sends_after.lock().unwrap()
            && sent.len() >= limit
        {
            return Err(EngineError::Delivery("chat not found".to_string()));
        }
        let id = format!("m{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        sent.push((id.clone(), message.clone()));
        Ok(id)
    }

    async fn delete(&self, _recipient: &Recipient, message_id: &str) -> Result<(), EngineError> {
        self.deleted.lock().unwrap().push(message_id.to_string());
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(EngineError::Delivery("message can't be deleted".to_string()));
        }
        Ok(())
    }
}

pub async fn migrated_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    db
}

pub struct Context {
    pub db: DatabaseConnection,
    pub store: Arc<Store>,
    pub delivery: Arc<FakeDelivery>,
    pub assistant: Assistant,
    pub user: Recipient,
}

impl Context {
    pub async fn new() -> Self {
        let db = migrated_db().await;
        let store = Arc::new(Store::builder().database(db.clone()).build().await.unwrap());
        let delivery = Arc::new(FakeDelivery::default());
        let assistant = Assistant::builder()
            .storage(store.clone())
            .delivery(delivery.clone())
            .timezone(UTC)
            .build()
            .unwrap();

        Self {
            db,
            store,
            delivery,
            assistant,
            user: Recipient::new(42, "ana"),
        }
    }

    /// A context whose user already went through `/start`.
    pub async fn started() -> Self {
        let ctx = Self::new().await;
        ctx.command(Command::Start).await;
        ctx
    }

    pub async fn command(&self, command: Command) -> Reply {
        self.assistant
            .route(&self.user, Signal::Command(command))
            .await
    }

    pub async fn text(&self, text: &str) -> Reply {
        self.assistant
            .route(&self.user, Signal::Text(text.to_string()))
            .await
    }

    pub async fn select(&self, tag: &str) -> Reply {
        self.assistant
            .route(&self.user, Signal::Selection(tag.to_string()))
            .await
    }

    pub async fn state(&self) -> ConversationState {
        self.store.state(self.user.id).await.unwrap()
    }

    pub fn period(&self) -> Period {
        Period::month_of(Utc::now(), UTC)
    }
}

pub fn texts(reply: &Reply) -> Vec<&str> {
    reply
        .messages
        .iter()
        .map(|message| message.text.as_str())
        .collect()
}

pub fn tokens(message: &ReplyMessage) -> Vec<&str> {
    message
        .options
        .iter()
        .map(|option| option.token.as_str())
        .collect()
}
