//! UI Builder module for creating keyboards and delivering replies

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::{FileId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, MessageId};
use tracing::warn;

use crate::events::{Attachment, Keyboard, Reply};
use crate::localization::MessageCatalog;
use crate::menu::{Category, MenuOption};
use crate::session::SessionController;

fn button(label: String, option: MenuOption) -> Vec<InlineKeyboardButton> {
    vec![InlineKeyboardButton::callback(label, option.callback_data())]
}

/// Create the inline keyboard for a reply, one button per row
pub fn build_keyboard(
    keyboard: Keyboard,
    catalog: &MessageCatalog,
    categories: &[Category],
) -> InlineKeyboardMarkup {
    let rows = match keyboard {
        Keyboard::Main => {
            let mut rows: Vec<_> = categories
                .iter()
                .map(|c| button(c.label.clone(), MenuOption::Category(c.id.clone())))
                .collect();
            rows.push(button(catalog.get("button-other-items"), MenuOption::OtherItems));
            rows.push(button(catalog.get("button-help"), MenuOption::Help));
            rows.push(button(catalog.get("button-contacts"), MenuOption::Contacts));
            rows.push(button(catalog.get("button-news"), MenuOption::NewsFeed));
            rows
        }
        Keyboard::Cancel => vec![button(catalog.get("button-cancel"), MenuOption::Cancel)],
        Keyboard::Back => vec![button(catalog.get("button-back"), MenuOption::Back)],
        Keyboard::ProductSelection => vec![button(
            catalog.get("button-product-selection"),
            MenuOption::ProductSelection,
        )],
    };

    InlineKeyboardMarkup::new(rows)
}

/// Deliver controller replies to a chat.
///
/// With `edit_target` set, the first text reply replaces that message's text
/// and keyboard; if the edit is refused a new message is sent instead.
pub async fn send_replies(
    bot: &Bot,
    controller: &SessionController,
    chat_id: ChatId,
    mut edit_target: Option<MessageId>,
    replies: Vec<Reply>,
) -> Result<()> {
    for reply in replies {
        match reply {
            Reply::Text { text, keyboard } => {
                let markup = keyboard.map(|k| {
                    build_keyboard(k, controller.catalog(), controller.categories())
                });

                if let Some(message_id) = edit_target.take() {
                    let mut request = bot.edit_message_text(chat_id, message_id, text.clone());
                    if let Some(markup) = markup.clone() {
                        request = request.reply_markup(markup);
                    }
                    match request.await {
                        Ok(_) => continue,
                        Err(e) => {
                            warn!(chat_id = %chat_id, error = %e, "Failed to edit message, sending a new one")
                        }
                    }
                }

                let mut request = bot.send_message(chat_id, text);
                if let Some(markup) = markup {
                    request = request.reply_markup(markup);
                }
                request.await?;
            }
            Reply::Attachment(Attachment::Photo(id)) => {
                bot.send_photo(chat_id, InputFile::file_id(FileId(id))).await?;
            }
            Reply::Attachment(Attachment::Document(id)) => {
                bot.send_document(chat_id, InputFile::file_id(FileId(id)))
                    .await?;
            }
        }
    }

    Ok(())
}
