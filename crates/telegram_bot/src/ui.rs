use engine::{Command, ReplyOption};
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

const BUTTONS_PER_ROW: usize = 3;
const FINISH_LABEL: &str = "⛔Finish action";

/// Lays the options out three per row and closes the keyboard with a button
/// that cancels the ongoing flow.
pub(crate) fn keyboard(options: &[ReplyOption]) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = options
        .chunks(BUTTONS_PER_ROW)
        .map(|chunk| chunk.iter().map(button).collect())
        .collect();
    rows.push(vec![button(&ReplyOption::command(
        Command::Cancel,
        FINISH_LABEL,
    ))]);

    InlineKeyboardMarkup::new(rows)
}

fn button(option: &ReplyOption) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(option.label.clone(), option.callback_data())
}

#[cfg(test)]
mod tests {
    use teloxide::types::InlineKeyboardButtonKind;

    use super::*;

    fn callback(button: &InlineKeyboardButton) -> &str {
        match &button.kind {
            InlineKeyboardButtonKind::CallbackData(data) => data,
            other => panic!("unexpected button kind {other:?}"),
        }
    }

    #[test]
    fn options_are_split_in_rows_of_three() {
        let options: Vec<ReplyOption> = ["Food", "Cafe", "Bar", "Auto"]
            .iter()
            .map(|tag| ReplyOption::tag(tag, *tag))
            .collect();

        let markup = keyboard(&options);

        let widths: Vec<usize> = markup.inline_keyboard.iter().map(Vec::len).collect();
        assert_eq!(widths, [3, 1, 1]);
        assert_eq!(callback(&markup.inline_keyboard[1][0]), "inline_inline_Auto");
    }

    #[test]
    fn last_row_finishes_the_action() {
        let markup = keyboard(&[ReplyOption::command(Command::Help, "❓help")]);

        let finish = &markup.inline_keyboard[1][0];
        assert_eq!(finish.text, FINISH_LABEL);
        assert_eq!(callback(finish), "inline_cancel");
        assert_eq!(callback(&markup.inline_keyboard[0][0]), "inline_help");
    }
}
