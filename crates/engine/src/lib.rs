//! Conversation engine of the expense tracker.
//!
//! An [`Assistant`] receives [`Signal`]s from a messenger adapter, resolves
//! them against the user's [`ConversationState`], runs the matching action
//! and presents the [`Reply`] through a [`MessageWindow`]. Persistence and
//! delivery are reached through the [`Storage`] and [`Delivery`] ports;
//! [`Store`] is the sea-orm implementation of the former.

pub use actions::DEFAULT_TAGS;
pub use assistant::{Assistant, AssistantBuilder};
pub use currency::Currency;
pub use error::EngineError;
pub use money::Money;
pub use money_events::MoneyEvent;
pub use period::Period;
pub use ports::{Delivery, Storage};
pub use reply::{Recipient, Reply, ReplyMessage, ReplyOption};
pub use signal::{Command, SELECTION_MARKER, Signal};
pub use state::ConversationState;
pub use stats::{BudgetStatus, TagSummary, summarize};
pub use store::{Store, StoreBuilder};
pub use targets::Target;
pub use window::MessageWindow;

mod actions;
mod assistant;
mod currency;
mod error;
mod money;
mod parsing;
mod period;
mod ports;
mod reply;
mod router;
mod signal;
mod state;
mod stats;
mod store;
mod window;

pub mod feedback;
pub mod money_events;
pub mod outgoing_messages;
pub mod tags;
pub mod targets;
pub mod usage_logs;
pub mod users;

type ResultEngine<T> = Result<T, EngineError>;
