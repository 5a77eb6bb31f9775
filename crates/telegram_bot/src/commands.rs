//! Command menu shown by Telegram next to the input field.

use engine::Command;
use teloxide::types::BotCommand;

pub(crate) fn menu() -> Vec<BotCommand> {
    Command::ALL
        .iter()
        .map(|command| BotCommand::new(command.token(), command.description()))
        .collect()
}
