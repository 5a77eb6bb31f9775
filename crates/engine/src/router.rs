//! Conversation state machine.
//!
//! Commands are dispatched regardless of state. Everything else goes through
//! [`plan`], a pure transition table from (state, input) to the step to
//! perform; the action handlers then persist the next state.

use crate::{
    Assistant, Command, ConversationState, Money, Recipient, Reply, ReplyMessage, ResultEngine,
    Signal,
    actions::{PROFILE_UNAVAILABLE, SYSTEM_PROBLEM},
    parsing::{Entry, parse_entry},
};

/// Input that is interpreted through the user's state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Input<'a> {
    Text(&'a str),
    Selection(&'a str),
}

/// What a state-dependent input resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// Each tag is toggled in order; only the last reply is shown.
    ToggleTags(Vec<String>),
    SelectBudgetTag(String),
    RecordBudget {
        tag: String,
        amount: Money,
    },
    AskCategory(Money),
    RecordSpending {
        amount: Money,
        tag: String,
        comment: String,
    },
    SaveFeedback(String),
    InvalidNumber,
    Unrecognized(String),
    Nothing,
}

pub(crate) fn plan(state: &ConversationState, input: Input<'_>) -> Step {
    use ConversationState as S;

    match (state, input) {
        (S::AwaitingTagEdits, Input::Selection(tag)) => Step::ToggleTags(vec![tag.to_string()]),
        (S::AwaitingTagEdits, Input::Text(text)) => {
            let tags: Vec<String> = text.split_whitespace().map(ToString::to_string).collect();
            if tags.is_empty() {
                Step::Nothing
            } else {
                Step::ToggleTags(tags)
            }
        }
        (S::AwaitingBudgetTagSelection | S::AwaitingBudgetAmount { .. }, Input::Selection(tag)) => {
            Step::SelectBudgetTag(tag.to_string())
        }
        (S::AwaitingBudgetTagSelection, Input::Text(_)) => Step::Nothing,
        (S::AwaitingBudgetAmount { tag }, Input::Text(text)) => match text.trim().parse::<Money>() {
            Ok(amount) => Step::RecordBudget {
                tag: tag.clone(),
                amount,
            },
            Err(_) => Step::InvalidNumber,
        },
        (S::AwaitingSpendingCategory { amount }, Input::Selection(tag)) => Step::RecordSpending {
            amount: *amount,
            tag: tag.to_string(),
            comment: String::new(),
        },
        (S::AwaitingFeedbackText, Input::Text(text)) => Step::SaveFeedback(text.to_string()),
        (S::Idle | S::AwaitingSpendingCategory { .. }, Input::Text(text)) => {
            match parse_entry(text) {
                Entry::Amount(amount) => Step::AskCategory(amount),
                Entry::Expense {
                    amount,
                    tag,
                    comment,
                } => Step::RecordSpending {
                    amount,
                    tag,
                    comment,
                },
                Entry::Malformed => Step::InvalidNumber,
                Entry::Feedback(text) => Step::SaveFeedback(text),
            }
        }
        (S::Idle | S::AwaitingFeedbackText, Input::Selection(token)) => {
            Step::Unrecognized(token.to_string())
        }
    }
}

impl Assistant {
    /// Resolves a signal into a reply. Failures never escape: they become a
    /// generic message and are logged.
    pub async fn route(&self, user: &Recipient, signal: Signal) -> Reply {
        let input = match &signal {
            Signal::Command(command) => return self.run_command(user, *command).await,
            Signal::Text(text) => Input::Text(text),
            Signal::Selection(token) => Input::Selection(token),
        };

        let state = match self.storage.state(user.id).await {
            Ok(state) => state,
            Err(err) => {
                tracing::error!("failed to load state of user {}: {err}", user.id);
                return ReplyMessage::text(PROFILE_UNAVAILABLE).into();
            }
        };

        let step = plan(&state, input);
        tracing::debug!("user {} in state '{state}' -> {step:?}", user.id);
        self.perform(user, step).await.unwrap_or_else(|err| {
            tracing::error!("turn of user {} failed: {err}", user.id);
            ReplyMessage::text(SYSTEM_PROBLEM).into()
        })
    }

    async fn run_command(&self, user: &Recipient, command: Command) -> Reply {
        let reply = self.dispatch(user, command).await.unwrap_or_else(|err| {
            tracing::error!("command {} of user {} failed: {err}", command.token(), user.id);
            ReplyMessage::text(SYSTEM_PROBLEM).into()
        });

        if let Err(err) = self.storage.record_usage(user.id, command.token()).await {
            tracing::warn!("failed to record usage of {}: {err}", command.token());
        }

        reply
    }

    /// Command registry: every global command has exactly one handler.
    async fn dispatch(&self, user: &Recipient, command: Command) -> ResultEngine<Reply> {
        match command {
            Command::Start => self.greet(user).await,
            Command::Help => Ok(self.help()),
            Command::DefineTags => self.tags_menu(user).await,
            Command::DefineBudget => self.budget_menu(user).await,
            Command::Statistics => self.statistics(user).await,
            Command::Feedback => self.feedback_prompt(user).await,
            Command::Cancel => self.cancel(user).await,
        }
    }

    async fn perform(&self, user: &Recipient, step: Step) -> ResultEngine<Reply> {
        match step {
            Step::ToggleTags(tags) => {
                let mut reply = Reply::empty();
                for tag in &tags {
                    reply = self.toggle_tag(user, tag).await?;
                }
                Ok(reply)
            }
            Step::SelectBudgetTag(tag) => self.select_budget_tag(user, &tag).await,
            Step::RecordBudget { tag, amount } => self.record_budget(user, &tag, amount).await,
            Step::AskCategory(amount) => self.ask_category(user, amount).await,
            Step::RecordSpending {
                amount,
                tag,
                comment,
            } => self.record_spending(user, amount, &tag, &comment).await,
            Step::SaveFeedback(text) => self.save_feedback(user, &text).await,
            Step::InvalidNumber => Ok(self.invalid_number()),
            Step::Unrecognized(token) => {
                tracing::warn!("unrecognized button '{token}' from user {}", user.id);
                Ok(self.unrecognized())
            }
            Step::Nothing => Ok(Reply::empty()),
        }
    }
}
