use engine::{Recipient, Signal};
use teloxide::{
    prelude::*,
    types::{CallbackQuery, User},
};

use crate::ConfigParameters;

pub(crate) async fn handle_message(
    _bot: Bot,
    msg: Message,
    cfg: ConfigParameters,
) -> ResponseResult<()> {
    if !is_allowed(&cfg, msg.from.as_ref()) {
        return Ok(());
    }

    let (Some(from), Some(text)) = (msg.from.as_ref(), msg.text()) else {
        return Ok(());
    };

    let recipient = recipient(from);
    turn(&cfg, &recipient, Signal::from_text(text)).await;
    Ok(())
}

pub(crate) async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    cfg: ConfigParameters,
) -> ResponseResult<()> {
    if !is_allowed(&cfg, Some(&q.from)) {
        return Ok(());
    }

    // Stops the loading indicator on the tapped button.
    if let Err(err) = bot.answer_callback_query(q.id.clone()).await {
        tracing::warn!("failed to answer callback query: {err}");
    }

    let Some(data) = q.data.as_deref() else {
        return Ok(());
    };
    let Some(signal) = Signal::from_callback(data) else {
        tracing::warn!("ignoring unknown callback data '{data}'");
        return Ok(());
    };

    turn(&cfg, &recipient(&q.from), signal).await;
    Ok(())
}

async fn turn(cfg: &ConfigParameters, recipient: &Recipient, signal: Signal) {
    tracing::debug!("user {} sent {signal:?}", recipient.id);
    if let Err(err) = cfg.assistant.handle(recipient, signal).await {
        tracing::error!("failed to reply to user {}: {err}", recipient.id);
    }
}

fn recipient(user: &User) -> Recipient {
    let name = user
        .username
        .clone()
        .unwrap_or_else(|| user.first_name.clone());
    Recipient::new(ChatId::from(user.id).0, name)
}

fn is_allowed(cfg: &ConfigParameters, from: Option<&User>) -> bool {
    let Some(from) = from else {
        return false;
    };
    match &cfg.allowed_users {
        None => true,
        Some(ids) => ids.contains(&from.id),
    }
}
