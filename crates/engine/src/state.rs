//! Per-user conversation state.
//!
//! The state decides how the next free text or button press is read. It is
//! persisted on the user row as a short token: a name, optionally followed by a
//! space and the payload (`budget_amount Food`, `tag_spending 12.50`).

use std::fmt;

use crate::Money;

const IDLE: &str = "";
const TAG_EDITS: &str = "tag_create";
const BUDGET_TAG_SELECTION: &str = "tag_budget";
const BUDGET_AMOUNT: &str = "budget_amount";
const SPENDING_CATEGORY: &str = "tag_spending";
const FEEDBACK_TEXT: &str = "feedback";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ConversationState {
    #[default]
    Idle,
    /// Typed words and tapped tags toggle the user's tags.
    AwaitingTagEdits,
    /// The budget menu is on screen; a tag must be tapped.
    AwaitingBudgetTagSelection,
    /// A budget tag was picked; the next text is its monthly target.
    AwaitingBudgetAmount { tag: String },
    /// An amount was typed; the next tapped tag records the expense.
    AwaitingSpendingCategory { amount: Money },
    /// The next text is stored as feedback.
    AwaitingFeedbackText,
}

impl ConversationState {
    /// Encodes the state into its persisted token.
    #[must_use]
    pub fn token(&self) -> String {
        match self {
            Self::Idle => IDLE.to_string(),
            Self::AwaitingTagEdits => TAG_EDITS.to_string(),
            Self::AwaitingBudgetTagSelection => BUDGET_TAG_SELECTION.to_string(),
            Self::AwaitingBudgetAmount { tag } => format!("{BUDGET_AMOUNT} {tag}"),
            Self::AwaitingSpendingCategory { amount } => format!("{SPENDING_CATEGORY} {amount}"),
            Self::AwaitingFeedbackText => FEEDBACK_TEXT.to_string(),
        }
    }

    /// Decodes a persisted token. Unknown or damaged tokens fall back to
    /// [`ConversationState::Idle`].
    #[must_use]
    pub fn parse(token: &str) -> Self {
        let (name, payload) = match token.split_once(' ') {
            Some((name, payload)) => (name, Some(payload)),
            None => (token, None),
        };

        match (name, payload) {
            (TAG_EDITS, None) => Self::AwaitingTagEdits,
            (BUDGET_TAG_SELECTION, None) => Self::AwaitingBudgetTagSelection,
            (FEEDBACK_TEXT, None) => Self::AwaitingFeedbackText,
            (BUDGET_AMOUNT, Some(tag)) if !tag.is_empty() => Self::AwaitingBudgetAmount {
                tag: tag.to_string(),
            },
            (SPENDING_CATEGORY, Some(amount)) => match amount.parse::<Money>() {
                Ok(amount) => Self::AwaitingSpendingCategory { amount },
                Err(err) => {
                    tracing::warn!("discarding state with unreadable amount '{token}': {err}");
                    Self::Idle
                }
            },
            (IDLE, None) => Self::Idle,
            _ => {
                tracing::warn!("unknown conversation state '{token}', treating as idle");
                Self::Idle
            }
        }
    }
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}
