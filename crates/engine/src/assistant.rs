use std::sync::Arc;

use chrono::Utc;
use chrono_tz::Tz;

use crate::{
    Currency, Delivery, EngineError, MessageWindow, Period, Recipient, ResultEngine, Signal,
    Storage,
};

/// The conversation engine: routes signals to actions and presents the
/// replies.
#[derive(Clone)]
pub struct Assistant {
    pub(crate) storage: Arc<dyn Storage>,
    pub(crate) window: MessageWindow,
    pub(crate) timezone: Tz,
    pub(crate) currency: Currency,
}

impl Assistant {
    /// Return a builder for `Assistant`. Help to build the struct.
    pub fn builder() -> AssistantBuilder {
        AssistantBuilder::default()
    }

    /// Runs one full turn: route the signal, then replace the visible
    /// messages with the reply.
    pub async fn handle(&self, user: &Recipient, signal: Signal) -> ResultEngine<()> {
        let reply = self.route(user, signal).await;
        self.window.present(user, &reply).await?;
        Ok(())
    }

    pub(crate) fn current_period(&self) -> Period {
        Period::month_of(Utc::now(), self.timezone)
    }
}

/// The builder for `Assistant`
pub struct AssistantBuilder {
    storage: Option<Arc<dyn Storage>>,
    delivery: Option<Arc<dyn Delivery>>,
    timezone: Tz,
    currency: Currency,
}

impl Default for AssistantBuilder {
    fn default() -> Self {
        Self {
            storage: None,
            delivery: None,
            timezone: chrono_tz::America::Argentina::Buenos_Aires,
            currency: Currency::default(),
        }
    }
}

impl AssistantBuilder {
    pub fn storage(mut self, storage: Arc<dyn Storage>) -> AssistantBuilder {
        self.storage = Some(storage);
        self
    }

    pub fn delivery(mut self, delivery: Arc<dyn Delivery>) -> AssistantBuilder {
        self.delivery = Some(delivery);
        self
    }

    /// Time zone used to compute calendar months.
    pub fn timezone(mut self, timezone: Tz) -> AssistantBuilder {
        self.timezone = timezone;
        self
    }

    /// Currency stamped on recorded expenses.
    pub fn currency(mut self, currency: Currency) -> AssistantBuilder {
        self.currency = currency;
        self
    }

    /// Construct `Assistant`
    pub fn build(self) -> ResultEngine<Assistant> {
        let storage = self
            .storage
            .ok_or_else(|| EngineError::Incomplete("storage".to_string()))?;
        let delivery = self
            .delivery
            .ok_or_else(|| EngineError::Incomplete("delivery".to_string()))?;

        Ok(Assistant {
            window: MessageWindow::new(storage.clone(), delivery),
            storage,
            timezone: self.timezone,
            currency: self.currency,
        })
    }
}
