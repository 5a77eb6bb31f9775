//! Telegram side of the [`Delivery`] port.

use async_trait::async_trait;
use engine::{Delivery, EngineError, Recipient, ReplyMessage};
use teloxide::{
    Bot, RequestError,
    payloads::SendMessageSetters,
    requests::Requester,
    types::{ChatId, MessageId},
};

use crate::ui;

#[derive(Clone)]
pub struct TelegramDelivery {
    bot: Bot,
}

impl TelegramDelivery {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn delivery_error(err: RequestError) -> EngineError {
    EngineError::Delivery(err.to_string())
}

#[async_trait]
impl Delivery for TelegramDelivery {
    async fn send(
        &self,
        recipient: &Recipient,
        message: &ReplyMessage,
    ) -> Result<String, EngineError> {
        let request = self.bot.send_message(ChatId(recipient.id), &message.text);
        let result = if message.options.is_empty() {
            request.await
        } else {
            request.reply_markup(ui::keyboard(&message.options)).await
        };
        let sent = result.map_err(delivery_error)?;

        Ok(sent.id.0.to_string())
    }

    async fn delete(&self, recipient: &Recipient, message_id: &str) -> Result<(), EngineError> {
        let message_id: i32 = message_id
            .parse()
            .map_err(|_| EngineError::Delivery(format!("invalid message id '{message_id}'")))?;

        self.bot
            .delete_message(ChatId(recipient.id), MessageId(message_id))
            .await
            .map_err(delivery_error)?;
        Ok(())
    }
}
