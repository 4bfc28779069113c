//! Message Handler module for processing incoming Telegram messages

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use tracing::debug;

use crate::events::{Attachment, Command, Event, Submission};
use crate::session::SessionController;

use super::ui_builder::send_replies;

/// Username of the message author, without the leading `@`
fn sender_handle(msg: &Message) -> Option<String> {
    msg.from.as_ref().and_then(|user| user.username.clone())
}

/// Extract text (or caption) and the attached photo or document
pub fn submission_from_message(msg: &Message) -> Submission {
    let text = msg.text().or_else(|| msg.caption()).map(str::to_string);

    // Telegram lists photo sizes smallest first
    let attachment = match msg.photo().and_then(|sizes| sizes.last()) {
        Some(photo) => Some(Attachment::Photo(photo.file.id.0.clone())),
        None => msg
            .document()
            .map(|doc| Attachment::Document(doc.file.id.0.clone())),
    };

    Submission { text, attachment }
}

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    controller: Arc<SessionController>,
) -> Result<()> {
    debug!(chat_id = %msg.chat.id, command = ?cmd, "Received command");

    let sender = sender_handle(&msg);
    let replies = controller
        .handle(msg.chat.id, sender.as_deref(), Event::Command(cmd))
        .await?;
    send_replies(&bot, &controller, msg.chat.id, None, replies).await
}

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    controller: Arc<SessionController>,
) -> Result<()> {
    let submission = submission_from_message(&msg);
    debug!(
        chat_id = %msg.chat.id,
        has_text = submission.text.is_some(),
        attachment = ?submission.attachment,
        "Received message"
    );

    let sender = sender_handle(&msg);
    let replies = controller
        .handle(msg.chat.id, sender.as_deref(), Event::Message(submission))
        .await?;
    send_replies(&bot, &controller, msg.chat.id, None, replies).await
}
