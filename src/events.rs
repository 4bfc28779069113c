//! Transport-neutral inputs and outputs of the session controller.

use serde::{Deserialize, Serialize};
use teloxide::utils::command::BotCommands;

use crate::menu::MenuOption;

/// Slash commands understood by the bot
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "snake_case", description = "Доступные команды:")]
pub enum Command {
    #[command(description = "главное меню")]
    Start,
    #[command(description = "отменить текущий запрос")]
    Cancel,
    #[command(description = "добавить новость")]
    AddNews,
    #[command(description = "опубликовать новость без вложения")]
    Skip,
}

/// Opaque reference to a file already uploaded to the messaging platform
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attachment {
    Photo(String),
    Document(String),
}

/// Free-form content of a user message
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Submission {
    /// Message text or attachment caption
    pub text: Option<String>,
    pub attachment: Option<Attachment>,
}

impl Submission {
    pub fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            attachment: None,
        }
    }

    pub fn attachment(attachment: Attachment) -> Self {
        Self {
            text: None,
            attachment: Some(attachment),
        }
    }

    /// Text with surrounding whitespace removed, `None` when blank
    pub fn trimmed_text(&self) -> Option<&str> {
        self.text.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// True when there is neither text nor an attachment to act on
    pub fn is_empty(&self) -> bool {
        self.trimmed_text().is_none() && self.attachment.is_none()
    }
}

/// Everything a conversation can receive
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    MenuSelect(MenuOption),
    Message(Submission),
    Command(Command),
}

/// Inline keyboards the controller can attach to a reply
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keyboard {
    /// Category list plus help, contacts and news buttons
    Main,
    /// Single cancel button shown while input is awaited
    Cancel,
    /// Single back button leading to the main menu
    Back,
    /// Shortcut back to product selection
    ProductSelection,
}

/// One outbound message to the conversation that produced the event
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    Text {
        text: String,
        keyboard: Option<Keyboard>,
    },
    Attachment(Attachment),
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Reply::Text {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }

    /// Text body, if this reply is a text message
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Reply::Text { text, .. } => Some(text),
            Reply::Attachment(_) => None,
        }
    }
}
