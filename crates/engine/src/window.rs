//! Keeps the chat window clean.
//!
//! Every reply replaces whatever the bot showed before: previously sent
//! messages are deleted, the new ones are sent and remembered so the next
//! reply can delete them in turn.

use std::sync::Arc;

use crate::{Delivery, Recipient, Reply, ResultEngine, Storage};

#[derive(Clone)]
pub struct MessageWindow {
    storage: Arc<dyn Storage>,
    delivery: Arc<dyn Delivery>,
}

impl MessageWindow {
    pub fn new(storage: Arc<dyn Storage>, delivery: Arc<dyn Delivery>) -> Self {
        Self { storage, delivery }
    }

    /// Replaces the visible messages of `recipient` with `reply`.
    ///
    /// Deletions are best effort. A failed send stops the remaining sends and
    /// is returned; messages delivered before it stay visible and recorded.
    /// Returns the identifiers of the sent messages.
    pub async fn present(&self, recipient: &Recipient, reply: &Reply) -> ResultEngine<Vec<String>> {
        if reply.is_empty() {
            return Ok(Vec::new());
        }

        self.clear(recipient).await;

        let mut sent = Vec::with_capacity(reply.messages.len());
        for message in &reply.messages {
            let message_id = self.delivery.send(recipient, message).await?;
            if let Err(err) = self
                .storage
                .save_visible_message(recipient.id, &message_id)
                .await
            {
                tracing::error!(
                    "failed to record message {message_id} for user {}: {err}",
                    recipient.id
                );
            }
            sent.push(message_id);
        }

        Ok(sent)
    }

    async fn clear(&self, recipient: &Recipient) {
        let visible = match self.storage.visible_messages(recipient.id).await {
            Ok(visible) => visible,
            Err(err) => {
                tracing::error!(
                    "failed to load visible messages for user {}: {err}",
                    recipient.id
                );
                return;
            }
        };

        for message_id in &visible {
            if let Err(err) = self.delivery.delete(recipient, message_id).await {
                tracing::warn!(
                    "failed to delete message {message_id} for user {}: {err}",
                    recipient.id
                );
            }
        }

        if let Err(err) = self.storage.clear_visible_messages(recipient.id).await {
            tracing::error!(
                "failed to clear visible messages for user {}: {err}",
                recipient.id
            );
        }
    }
}
