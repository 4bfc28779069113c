//! Callback Handler module for processing inline keyboard callback queries

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use tracing::debug;

use crate::events::Event;
use crate::menu::MenuOption;
use crate::session::SessionController;

use super::ui_builder::send_replies;

/// Handle callback queries from inline keyboards
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    controller: Arc<SessionController>,
) -> Result<()> {
    debug!(user_id = %q.from.id, data = ?q.data, "Received callback query from user");

    // Answer the callback query to remove the loading state
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(option) = q.data.as_deref().and_then(MenuOption::parse) else {
        debug!(user_id = %q.from.id, "Ignoring unknown callback data");
        return Ok(());
    };
    let Some(msg) = &q.message else {
        return Ok(());
    };

    let chat_id = msg.chat().id;
    let replies = controller
        .handle(chat_id, q.from.username.as_deref(), Event::MenuSelect(option))
        .await?;

    // The pressed message is edited in place, further replies are sent below it
    send_replies(&bot, &controller, chat_id, Some(msg.id()), replies).await
}
