use crate::Money;

/// What an idle user meant with a free text message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Entry {
    /// Only an amount: the category still has to be picked.
    Amount(Money),
    /// `<amount> <tag> [comment...]`
    Expense {
        amount: Money,
        tag: String,
        comment: String,
    },
    /// Looked like a number but was not one.
    Malformed,
    Feedback(String),
}

/// Parses an idle message positionally.
///
/// - `1500` => amount only
/// - `1500 Food` / `1500 Food lunch with Ana` => complete expense
/// - `12,3,4` or `-` => malformed number
/// - anything else => feedback
pub(crate) fn parse_entry(input: &str) -> Entry {
    let text = input.trim();
    if text.is_empty() {
        return Entry::Malformed;
    }

    let Some((head, rest)) = text.split_once(char::is_whitespace) else {
        return match text.parse::<Money>() {
            Ok(amount) => Entry::Amount(amount),
            Err(_) if looks_numeric(text) => Entry::Malformed,
            Err(_) => Entry::Feedback(text.to_string()),
        };
    };

    let Ok(amount) = head.parse::<Money>() else {
        return Entry::Feedback(text.to_string());
    };

    let rest = rest.trim_start();
    let (tag, comment) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    if tag.is_empty() {
        return Entry::Amount(amount);
    }

    Entry::Expense {
        amount,
        tag: tag.to_string(),
        comment: comment.trim().to_string(),
    }
}

fn looks_numeric(token: &str) -> bool {
    token.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | ','))
}
