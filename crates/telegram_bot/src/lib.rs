//! Telegram bot.
//!
//! Translates Telegram updates into [`Signal`](engine::Signal)s for the
//! [`Assistant`] and implements the [`Delivery`](engine::Delivery) port on top
//! of the Bot API.

use std::sync::Arc;

use chrono_tz::Tz;
use engine::{Assistant, Currency, EngineError, Storage};
use teloxide::prelude::*;

pub use delivery::TelegramDelivery;

mod commands;
mod delivery;
mod handlers;
mod ui;

#[derive(Clone)]
pub struct ConfigParameters {
    allowed_users: Option<Vec<UserId>>,
    assistant: Assistant,
}

pub struct Bot {
    bot: teloxide::Bot,
    allowed_users: Option<Vec<UserId>>,
    assistant: Assistant,
}

impl Bot {
    pub fn builder() -> BotBuilder {
        BotBuilder::default()
    }

    pub async fn run(&self) {
        tracing::info!("Starting telegram bot...");

        if let Err(err) = self.bot.set_my_commands(commands::menu()).await {
            tracing::error!("failed to register the command menu: {err}");
        }

        let parameters = ConfigParameters {
            allowed_users: self.allowed_users.clone(),
            assistant: self.assistant.clone(),
        };

        let handler = dptree::entry()
            .branch(Update::filter_message().endpoint(handlers::handle_message))
            .branch(Update::filter_callback_query().endpoint(handlers::handle_callback));

        Dispatcher::builder(self.bot.clone(), handler)
            .dependencies(dptree::deps![parameters])
            .default_handler(|upd| async move {
                tracing::warn!("Unhandled update: {:?}", upd);
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}

#[derive(Default)]
pub struct BotBuilder {
    token: String,
    allowed_users: Option<Vec<UserId>>,
    storage: Option<Arc<dyn Storage>>,
    timezone: Option<Tz>,
    currency: Currency,
}

impl BotBuilder {
    pub fn token(mut self, token: &str) -> BotBuilder {
        self.token = token.to_string();
        self
    }

    /// Telegram user ids. An empty list lets everybody in.
    pub fn allowed_users(mut self, allowed_users: &[u64]) -> BotBuilder {
        if !allowed_users.is_empty() {
            self.allowed_users = Some(allowed_users.iter().copied().map(UserId).collect());
        }
        self
    }

    pub fn storage(mut self, storage: Arc<dyn Storage>) -> BotBuilder {
        self.storage = Some(storage);
        self
    }

    pub fn timezone(mut self, timezone: Tz) -> BotBuilder {
        self.timezone = Some(timezone);
        self
    }

    pub fn currency(mut self, currency: Currency) -> BotBuilder {
        self.currency = currency;
        self
    }

    pub fn build(self) -> Result<Bot, EngineError> {
        tracing::info!("Initializing telegram bot...");
        let storage = self
            .storage
            .ok_or_else(|| EngineError::Incomplete("storage".to_string()))?;
        let bot = teloxide::Bot::new(&self.token);

        let mut assistant = Assistant::builder()
            .storage(storage)
            .delivery(Arc::new(TelegramDelivery::new(bot.clone())))
            .currency(self.currency);
        if let Some(timezone) = self.timezone {
            assistant = assistant.timezone(timezone);
        }

        Ok(Bot {
            bot,
            allowed_users: self.allowed_users,
            assistant: assistant.build()?,
        })
    }
}
