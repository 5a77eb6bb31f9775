//! Inbound signals and the global command registry.

/// Marker prepended to every button payload. Tag buttons carry it twice
/// (`inline_inline_Food`), command buttons once (`inline_help`).
pub const SELECTION_MARKER: &str = "inline_";

/// Global commands. They work from any conversation state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    Start,
    Help,
    DefineTags,
    DefineBudget,
    Statistics,
    Feedback,
    Cancel,
}

impl Command {
    pub const ALL: [Command; 7] = [
        Command::Start,
        Command::Help,
        Command::DefineTags,
        Command::DefineBudget,
        Command::Statistics,
        Command::Feedback,
        Command::Cancel,
    ];

    /// Token used both as slash command and as button payload.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Help => "help",
            Command::DefineTags => "define_tags",
            Command::DefineBudget => "define_budget",
            Command::Statistics => "view_statistics",
            Command::Feedback => "feedback",
            Command::Cancel => "cancel",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Command::Start => "Start the bot and get a description",
            Command::Help => "Get a list of all available commands",
            Command::DefineTags => "Define categories of expenses",
            Command::DefineBudget => "Set a budget for each category for the current month",
            Command::Statistics => "View your current month statistics",
            Command::Feedback => "Give feedback to developers about this product",
            Command::Cancel => "Finish ongoing operation",
        }
    }

    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.token() == token)
    }
}

/// One unit of user interaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Signal {
    Command(Command),
    Text(String),
    /// A tapped option that is not a command, usually a tag.
    Selection(String),
}

impl Signal {
    /// Classifies a text message. `/cmd` and `/cmd@bot_name` become commands
    /// when the token is known; everything else is free text.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        if let Some(rest) = text.trim().strip_prefix('/') {
            let word = rest.split_whitespace().next().unwrap_or_default();
            let token = word.split_once('@').map_or(word, |(token, _)| token);
            if let Some(command) = Command::from_token(token) {
                return Self::Command(command);
            }
        }
        Self::Text(text.to_string())
    }

    /// Decodes a button payload. Returns `None` when the payload was not
    /// produced by this bot.
    #[must_use]
    pub fn from_callback(data: &str) -> Option<Self> {
        let token = data.strip_prefix(SELECTION_MARKER)?;
        if let Some(tag) = token.strip_prefix(SELECTION_MARKER) {
            return Some(Self::Selection(tag.to_string()));
        }
        Some(match Command::from_token(token) {
            Some(command) => Self::Command(command),
            None => Self::Selection(token.to_string()),
        })
    }
}
