//! Domain actions run by the conversation state machine.
//!
//! Each handler does at most one logical write and returns the reply to
//! present. State changes that start or end a flow happen here.

use std::collections::BTreeSet;

use chrono::Utc;

use crate::{
    Assistant, Command, ConversationState, Money, MoneyEvent, Recipient, Reply, ReplyMessage,
    ReplyOption, ResultEngine, stats::summarize,
};

pub(crate) const PROFILE_UNAVAILABLE: &str = "Problem reading your profile. Please try again later";
pub(crate) const SYSTEM_PROBLEM: &str = "Problem in our system. Please try again later";

const WELCOME: &str = "👋 ¡Hola! Welcome to the Buenos Aires Expense Tracker Bot. I'm here to help you keep track of your daily expenses with ease. Whether you're trying to stay on budget or just want to see where your money goes, I've got you covered. Let's make managing your expenses a breeze! 💰📊";
const EXPENSE_USAGE: &str =
    "<number> <tag> <comment> - save a new expense (only number is required, other fields are optional)";
const MAIN_OPTIONS: &str = "To add new expense just type it here. Other commands:";
const NO_TAGS_YET: &str = "You didn't select tags yet. Please select from the list to add or input your own by keyboard";
const CURRENT_TAGS: &str =
    "Your current tags are below.\nSelect a tag to delete or input new tags by keyboard";
const BUDGET_PROMPT: &str =
    "To update budget for this month select a tag and then enter target amount";
const CATEGORY_PROMPT: &str = "For which category do I have to record this expense?";
const FEEDBACK_PROMPT: &str = "📢 Your Feedback Matters!\n\nWe're always looking to improve your experience with the Buenos Aires Expense Tracker. If you have a moment, we'd love to hear your thoughts on how we can make this bot even better. Whether it's a new feature suggestion, a bug report, or just general feedback, we're all ears! Just send your feedback now!";
const FEEDBACK_THANKS: &str = "Thank you for helping us grow and serve you better!";
const NO_SPENDING: &str = "No expenses recorded this month yet";
const INVALID_NUMBER: &str = "I can't understand your number, please enter correct number";
const UNRECOGNIZED: &str = "I didn't recognize the command. Sorry";
const TAG_TOO_LONG: &str = "This tag is too long, please choose a shorter name";

/// Offered when the user has not picked any tag yet.
pub const DEFAULT_TAGS: [(&str, &str); 13] = [
    ("Food", "🍜Food"),
    ("Cafe", "☕Cafe"),
    ("Bar", "🍹Bar"),
    ("Auto", "🚙Auto"),
    ("Medicine", "🚑Medicine"),
    ("Credits", "Credits"),
    ("Travel", "🚢Travel"),
    ("Garden", "🌼Garden"),
    ("Culture", "🎭Culture"),
    ("Home", "🏠Home"),
    ("Pet", "🐩Pet"),
    ("Clothes", "👗Clothes"),
    ("Investment", "💎Investment"),
];

fn main_options() -> ReplyMessage {
    ReplyMessage::with_options(
        MAIN_OPTIONS,
        vec![
            ReplyOption::command(Command::Help, "❓help"),
            ReplyOption::command(Command::DefineTags, "✏tags"),
            ReplyOption::command(Command::DefineBudget, "💰budget"),
            ReplyOption::command(Command::Statistics, "📊statistics"),
        ],
    )
}

fn help_text() -> String {
    let mut lines: Vec<String> = Command::ALL
        .iter()
        .map(|command| format!("/{} - {}", command.token(), command.description()))
        .collect();
    // Right after /define_budget.
    lines.insert(4, EXPENSE_USAGE.to_string());
    lines.join("\n")
}

fn default_tag_options() -> Vec<ReplyOption> {
    DEFAULT_TAGS
        .iter()
        .map(|(tag, label)| ReplyOption::tag(tag, *label))
        .collect()
}

fn tag_options(tags: &BTreeSet<String>) -> Vec<ReplyOption> {
    if tags.is_empty() {
        return default_tag_options();
    }
    tags.iter().map(|tag| ReplyOption::tag(tag, tag.as_str())).collect()
}

fn tag_list(tags: &BTreeSet<String>) -> ReplyMessage {
    let text = if tags.is_empty() {
        NO_TAGS_YET
    } else {
        CURRENT_TAGS
    };
    ReplyMessage::with_options(text, tag_options(tags))
}

impl Assistant {
    pub(crate) async fn greet(&self, user: &Recipient) -> ResultEngine<Reply> {
        let exists = match self.storage.user_exists(user.id).await {
            Ok(exists) => exists,
            Err(err) => {
                tracing::error!("failed to look up user {}: {err}", user.id);
                false
            }
        };

        if !exists {
            self.storage.create_user(user.id, &user.name).await?;
            tracing::info!("created user {} ({})", user.id, user.name);
        }

        Ok(Reply::from(ReplyMessage::text(WELCOME)).then(main_options()))
    }

    pub(crate) fn help(&self) -> Reply {
        Reply::from(ReplyMessage::text(help_text())).then(main_options())
    }

    pub(crate) async fn tags_menu(&self, user: &Recipient) -> ResultEngine<Reply> {
        let tags = self.storage.tags(user.id).await?;
        self.storage
            .set_state(user.id, &ConversationState::AwaitingTagEdits)
            .await?;
        Ok(tag_list(&tags).into())
    }

    pub(crate) async fn toggle_tag(&self, user: &Recipient, tag: &str) -> ResultEngine<Reply> {
        let mut tags = self.storage.tags(user.id).await?;
        // Tags end up on buttons, whose payload size is limited.
        if !tags.contains(tag) && !ReplyOption::tag(tag, tag).fits() {
            return Ok(ReplyMessage::text(TAG_TOO_LONG).into());
        }

        let confirmation = if tags.remove(tag) {
            self.storage.remove_tag(user.id, tag).await?;
            format!("Tag '{tag}' deleted")
        } else {
            self.storage.add_tag(user.id, tag).await?;
            tags.insert(tag.to_string());
            format!("Tag '{tag}' added")
        };

        Ok(Reply::from(ReplyMessage::text(confirmation)).then(tag_list(&tags)))
    }

    pub(crate) async fn budget_menu(&self, user: &Recipient) -> ResultEngine<Reply> {
        let period = self.current_period();
        let targets = self
            .storage
            .targets(user.id, period)
            .await
            .unwrap_or_else(|err| {
                tracing::error!("failed to load targets of user {}: {err}", user.id);
                Vec::new()
            });
        let tags = self.storage.tags(user.id).await.unwrap_or_else(|err| {
            tracing::error!("failed to load tags of user {}: {err}", user.id);
            BTreeSet::new()
        });

        self.storage
            .set_state(user.id, &ConversationState::AwaitingBudgetTagSelection)
            .await?;

        let mut options: Vec<ReplyOption> = targets
            .iter()
            .map(|target| {
                ReplyOption::tag(&target.tag, format!("{} - {}", target.tag, target.amount))
            })
            .collect();
        options.extend(
            tags.iter()
                .filter(|tag| !targets.iter().any(|target| &target.tag == *tag))
                .map(|tag| ReplyOption::tag(tag, tag.as_str())),
        );
        if options.is_empty() {
            options = default_tag_options();
        }

        Ok(ReplyMessage::with_options(BUDGET_PROMPT, options).into())
    }

    pub(crate) async fn select_budget_tag(
        &self,
        user: &Recipient,
        tag: &str,
    ) -> ResultEngine<Reply> {
        self.storage
            .set_state(
                user.id,
                &ConversationState::AwaitingBudgetAmount {
                    tag: tag.to_string(),
                },
            )
            .await?;

        Ok(ReplyMessage::text(format!(
            "Enter updated amount of money you want to spend on '{tag}' in this month (or 0 if you don't want to spend money for this)"
        ))
        .into())
    }

    pub(crate) async fn record_budget(
        &self,
        user: &Recipient,
        tag: &str,
        amount: Money,
    ) -> ResultEngine<Reply> {
        self.storage
            .upsert_target(user.id, tag, amount, self.current_period())
            .await?;

        let confirmation =
            Reply::from(ReplyMessage::text(format!("Recorded: budget for '{tag}' is {amount}")));
        match self.budget_menu(user).await {
            Ok(menu) => Ok(confirmation.extend(menu)),
            Err(err) => {
                tracing::error!("failed to show budget menu to user {}: {err}", user.id);
                Ok(confirmation)
            }
        }
    }

    pub(crate) async fn statistics(&self, user: &Recipient) -> ResultEngine<Reply> {
        let period = self.current_period();
        let events = self.storage.money_events(user.id, period).await?;
        let targets = self.storage.targets(user.id, period).await?;

        let summary = summarize(&events, &targets);
        let text = if summary.is_empty() {
            NO_SPENDING.to_string()
        } else {
            summary
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n")
        };

        Ok(Reply::from(ReplyMessage::text(text)).then(main_options()))
    }

    pub(crate) async fn ask_category(&self, user: &Recipient, amount: Money) -> ResultEngine<Reply> {
        let tags = self.storage.tags(user.id).await?;
        self.storage
            .set_state(user.id, &ConversationState::AwaitingSpendingCategory { amount })
            .await?;

        Ok(ReplyMessage::with_options(CATEGORY_PROMPT, tag_options(&tags)).into())
    }

    pub(crate) async fn record_spending(
        &self,
        user: &Recipient,
        amount: Money,
        tag: &str,
        comment: &str,
    ) -> ResultEngine<Reply> {
        let event = MoneyEvent {
            amount,
            currency: self.currency,
            comment: comment.to_string(),
            tag: tag.to_string(),
            created: Utc::now(),
        };
        self.storage.create_money_event(user.id, &event).await?;

        if let Err(err) = self
            .storage
            .set_state(user.id, &ConversationState::Idle)
            .await
        {
            tracing::error!(
                "expense recorded but state of user {} was not reset: {err}",
                user.id
            );
        }

        Ok(
            Reply::from(ReplyMessage::text(format!(
                "Your expense is recorded:\n{amount} - {tag}"
            )))
            .then(main_options()),
        )
    }

    pub(crate) async fn feedback_prompt(&self, user: &Recipient) -> ResultEngine<Reply> {
        self.storage
            .set_state(user.id, &ConversationState::AwaitingFeedbackText)
            .await?;
        Ok(ReplyMessage::text(FEEDBACK_PROMPT).into())
    }

    pub(crate) async fn save_feedback(&self, user: &Recipient, text: &str) -> ResultEngine<Reply> {
        self.storage.save_feedback(user.id, text).await?;
        self.storage
            .set_state(user.id, &ConversationState::Idle)
            .await?;
        Ok(Reply::from(ReplyMessage::text(FEEDBACK_THANKS)).then(main_options()))
    }

    pub(crate) async fn cancel(&self, user: &Recipient) -> ResultEngine<Reply> {
        self.storage
            .set_state(user.id, &ConversationState::Idle)
            .await?;
        Ok(main_options().into())
    }

    pub(crate) fn invalid_number(&self) -> Reply {
        ReplyMessage::text(INVALID_NUMBER).into()
    }

    pub(crate) fn unrecognized(&self) -> Reply {
        ReplyMessage::text(UNRECOGNIZED).into()
    }
}
