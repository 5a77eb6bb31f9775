//! Reply content produced by the action handlers.

use crate::signal::{Command, SELECTION_MARKER};

/// Largest button payload Telegram accepts, in bytes.
pub const MAX_CALLBACK_BYTES: usize = 64;

/// Who a turn is for. The id doubles as the chat to answer in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recipient {
    pub id: i64,
    pub name: String,
}

impl Recipient {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A tappable option attached to a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplyOption {
    pub label: String,
    pub token: String,
}

impl ReplyOption {
    pub fn command(command: Command, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            token: command.token().to_string(),
        }
    }

    pub fn tag(tag: &str, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            token: format!("{SELECTION_MARKER}{tag}"),
        }
    }

    /// Payload attached to the button, decoded back by
    /// [`Signal::from_callback`](crate::Signal::from_callback).
    #[must_use]
    pub fn callback_data(&self) -> String {
        format!("{SELECTION_MARKER}{}", self.token)
    }

    /// Whether the payload can be attached to a button.
    #[must_use]
    pub fn fits(&self) -> bool {
        self.callback_data().len() <= MAX_CALLBACK_BYTES
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplyMessage {
    pub text: String,
    pub options: Vec<ReplyOption>,
}

impl ReplyMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: Vec::new(),
        }
    }

    pub fn with_options(text: impl Into<String>, options: Vec<ReplyOption>) -> Self {
        Self {
            text: text.into(),
            options,
        }
    }
}

/// Ordered list of messages shown to the user at the end of a turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reply {
    pub messages: Vec<ReplyMessage>,
}

impl Reply {
    /// A reply that leaves the chat window as it is.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn then(mut self, message: ReplyMessage) -> Self {
        self.messages.push(message);
        self
    }

    #[must_use]
    pub fn extend(mut self, other: Reply) -> Self {
        self.messages.extend(other.messages);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl From<ReplyMessage> for Reply {
    fn from(message: ReplyMessage) -> Self {
        Self {
            messages: vec![message],
        }
    }
}
