//! Conversation state kept for every chat talking to the bot.

use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

/// Longest news text that still fits a Telegram message once prefixed
pub const MAX_NEWS_TEXT_CHARS: usize = 4000;

/// The single pending operation a conversation is inside, if any
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversationState {
    #[default]
    Idle,
    HelpRequest,
    FreeRequest {
        category: String,
    },
    NewsSubmission(WizardStep),
}

/// Steps of the news submission wizard
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardStep {
    AwaitingText,
    AwaitingAttachmentOrSkip { text: String },
}

pub type ConversationDialogue = Dialogue<ConversationState, InMemStorage<ConversationState>>;

/// Why a news text was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsTextError {
    Empty,
    TooLong,
}

/// Validates a news text input
pub fn validate_news_text(text: &str) -> Result<String, NewsTextError> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err(NewsTextError::Empty);
    }

    if trimmed.chars().count() > MAX_NEWS_TEXT_CHARS {
        return Err(NewsTextError::TooLong);
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_news_text_validation() {
        assert!(validate_news_text("Контейнер прибыл на склад").is_ok());
        assert_eq!(validate_news_text(""), Err(NewsTextError::Empty));
        assert_eq!(validate_news_text("   "), Err(NewsTextError::Empty));
        assert_eq!(
            validate_news_text(&"я".repeat(MAX_NEWS_TEXT_CHARS + 1)),
            Err(NewsTextError::TooLong)
        );
        // Limit counts characters, not bytes
        assert!(validate_news_text(&"я".repeat(MAX_NEWS_TEXT_CHARS)).is_ok());
    }

    #[test]
    fn test_news_text_trimming() {
        assert_eq!(validate_news_text("  Отгрузка  ").unwrap(), "Отгрузка");
    }

    #[test]
    fn test_default_state_is_idle() {
        assert_eq!(ConversationState::default(), ConversationState::Idle);
    }
}
