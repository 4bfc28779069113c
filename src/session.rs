//! # Session Controller
//!
//! Maps `(conversation state, event)` to replies and the next state. The
//! controller knows nothing about Telegram updates or keyboards markup; the
//! `bot` module translates in both directions.
//!
//! State lives in a teloxide [`InMemStorage`] keyed by chat id, created on
//! the first event of a chat and never evicted.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};
use teloxide::types::ChatId;
use tracing::{debug, error, info};

use crate::dialogue::{
    validate_news_text, ConversationDialogue, ConversationState, NewsTextError, WizardStep,
    MAX_NEWS_TEXT_CHARS,
};
use crate::events::{Attachment, Command, Event, Keyboard, Reply, Submission};
use crate::gateway::{OperatorGateway, OperatorMessage};
use crate::localization::MessageCatalog;
use crate::menu::{Category, MenuOption};
use crate::news_store::{NewsEntry, NewsStore};

/// Request identifiers are Unix seconds at forwarding time.
///
/// Two requests forwarded within the same second share an identifier.
pub fn allocate_request_id(now: DateTime<Utc>) -> i64 {
    now.timestamp()
}

pub struct SessionController {
    storage: Arc<InMemStorage<ConversationState>>,
    news: Arc<NewsStore>,
    gateway: Arc<dyn OperatorGateway>,
    catalog: Arc<MessageCatalog>,
    categories: Vec<Category>,
}

impl SessionController {
    pub fn new(
        news: Arc<NewsStore>,
        gateway: Arc<dyn OperatorGateway>,
        catalog: Arc<MessageCatalog>,
        categories: Vec<Category>,
    ) -> Self {
        Self {
            storage: InMemStorage::new(),
            news,
            gateway,
            catalog,
            categories,
        }
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Current state of a conversation; unseen chats are idle
    pub async fn state(&self, chat_id: ChatId) -> Result<ConversationState> {
        Ok(self.dialogue(chat_id).get().await?.unwrap_or_default())
    }

    /// Process one event of one conversation and return what to send back
    pub async fn handle(
        &self,
        chat_id: ChatId,
        sender: Option<&str>,
        event: Event,
    ) -> Result<Vec<Reply>> {
        let dialogue = self.dialogue(chat_id);
        let state = dialogue.get().await?.unwrap_or_default();
        debug!(chat_id = %chat_id, state = ?state, event = ?event, "Handling conversation event");

        match event {
            Event::MenuSelect(option) => self.handle_menu(&dialogue, state, option).await,
            Event::Command(command) => self.handle_command(&dialogue, state, command).await,
            Event::Message(submission) => {
                self.handle_message(&dialogue, state, sender, submission)
                    .await
            }
        }
    }

    fn dialogue(&self, chat_id: ChatId) -> ConversationDialogue {
        Dialogue::new(self.storage.clone(), chat_id)
    }

    async fn handle_menu(
        &self,
        dialogue: &ConversationDialogue,
        state: ConversationState,
        option: MenuOption,
    ) -> Result<Vec<Reply>> {
        let t = &self.catalog;
        match option {
            MenuOption::Cancel => self.cancel(dialogue, &state).await,
            MenuOption::Category(id) => {
                let (label, hint) = match self.categories.iter().find(|c| c.id == id) {
                    Some(category) => (
                        category.label.clone(),
                        category.hint.clone().unwrap_or_else(|| t.get("hint-generic")),
                    ),
                    None => (t.get("category-unknown"), t.get("hint-generic")),
                };
                self.begin_free_request(dialogue, label, hint).await
            }
            MenuOption::OtherItems => {
                self.begin_free_request(dialogue, t.get("category-other"), t.get("hint-other"))
                    .await
            }
            MenuOption::Help => {
                dialogue.update(ConversationState::HelpRequest).await?;
                Ok(vec![Reply::with_keyboard(t.get("help-prompt"), Keyboard::Cancel)])
            }
            MenuOption::Contacts => {
                dialogue.reset().await?;
                Ok(vec![Reply::with_keyboard(
                    t.get("contacts"),
                    Keyboard::ProductSelection,
                )])
            }
            MenuOption::NewsFeed => {
                dialogue.reset().await?;
                Ok(self.render_news_feed().await)
            }
            MenuOption::Back | MenuOption::ProductSelection => {
                dialogue.reset().await?;
                Ok(vec![Reply::with_keyboard(t.get("choose-category"), Keyboard::Main)])
            }
        }
    }

    async fn handle_command(
        &self,
        dialogue: &ConversationDialogue,
        state: ConversationState,
        command: Command,
    ) -> Result<Vec<Reply>> {
        let t = &self.catalog;
        match (command, state) {
            (Command::Start, _) => {
                dialogue.reset().await?;
                Ok(vec![Reply::with_keyboard(t.get("welcome"), Keyboard::Main)])
            }
            (Command::Cancel, state) => self.cancel(dialogue, &state).await,
            (Command::AddNews, _) => {
                dialogue
                    .update(ConversationState::NewsSubmission(WizardStep::AwaitingText))
                    .await?;
                Ok(vec![Reply::text(t.get("news-text-prompt"))])
            }
            (
                Command::Skip,
                ConversationState::NewsSubmission(WizardStep::AwaitingAttachmentOrSkip { text }),
            ) => self.publish_news(dialogue, text, None).await,
            (Command::Skip, ConversationState::NewsSubmission(WizardStep::AwaitingText)) => {
                Ok(vec![Reply::text(t.get("news-text-prompt"))])
            }
            (Command::Skip, _) => Ok(Vec::new()),
        }
    }

    async fn handle_message(
        &self,
        dialogue: &ConversationDialogue,
        state: ConversationState,
        sender: Option<&str>,
        submission: Submission,
    ) -> Result<Vec<Reply>> {
        if submission
            .trimmed_text()
            .is_some_and(|text| self.is_cancel_word(text))
        {
            return self.cancel(dialogue, &state).await;
        }

        let t = &self.catalog;
        match state {
            // Messages outside of a pending operation (including chatter in
            // the operator group) get no answer
            ConversationState::Idle => Ok(Vec::new()),
            ConversationState::HelpRequest => {
                if submission.is_empty() {
                    return Ok(vec![Reply::with_keyboard(
                        t.get("help-reprompt"),
                        Keyboard::Cancel,
                    )]);
                }
                self.forward_help_request(dialogue, sender, submission).await
            }
            ConversationState::FreeRequest { category } => {
                if submission.is_empty() {
                    return Ok(vec![Reply::with_keyboard(
                        t.get("free-reprompt"),
                        Keyboard::Cancel,
                    )]);
                }
                self.forward_free_request(dialogue, sender, category, submission)
                    .await
            }
            ConversationState::NewsSubmission(WizardStep::AwaitingText) => {
                match validate_news_text(submission.text.as_deref().unwrap_or("")) {
                    // captioned photo or document: the entry is complete
                    Ok(text) if submission.attachment.is_some() => {
                        self.publish_news(dialogue, text, submission.attachment).await
                    }
                    Ok(text) => {
                        dialogue
                            .update(ConversationState::NewsSubmission(
                                WizardStep::AwaitingAttachmentOrSkip { text },
                            ))
                            .await?;
                        Ok(vec![Reply::text(t.get("news-attachment-prompt"))])
                    }
                    Err(NewsTextError::Empty) => Ok(vec![Reply::text(t.get("news-text-empty"))]),
                    Err(NewsTextError::TooLong) => Ok(vec![Reply::text(t.get_with_args(
                        "news-text-too-long",
                        &[("max", &MAX_NEWS_TEXT_CHARS.to_string())],
                    ))]),
                }
            }
            ConversationState::NewsSubmission(WizardStep::AwaitingAttachmentOrSkip { text }) => {
                match submission.attachment {
                    Some(attachment) => self.publish_news(dialogue, text, Some(attachment)).await,
                    None => Ok(vec![Reply::text(t.get("news-attachment-reprompt"))]),
                }
            }
        }
    }

    fn is_cancel_word(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        text == self.catalog.get("cancel-word") || text == "cancel"
    }

    async fn cancel(
        &self,
        dialogue: &ConversationDialogue,
        state: &ConversationState,
    ) -> Result<Vec<Reply>> {
        dialogue.reset().await?;
        let key = match state {
            ConversationState::NewsSubmission(_) => "news-cancelled",
            _ => "request-cancelled",
        };
        info!(chat_id = %dialogue.chat_id(), state = ?state, "Pending operation cancelled");
        Ok(vec![Reply::with_keyboard(self.catalog.get(key), Keyboard::Main)])
    }

    async fn begin_free_request(
        &self,
        dialogue: &ConversationDialogue,
        category: String,
        hint: String,
    ) -> Result<Vec<Reply>> {
        let prompt = self
            .catalog
            .get_with_args("category-selected", &[("category", &category), ("hint", &hint)]);
        dialogue
            .update(ConversationState::FreeRequest { category })
            .await?;
        Ok(vec![Reply::with_keyboard(prompt, Keyboard::Cancel)])
    }

    async fn render_news_feed(&self) -> Vec<Reply> {
        let t = &self.catalog;
        let entries = self.news.load_all().await;
        if entries.is_empty() {
            return vec![Reply::with_keyboard(t.get("news-empty"), Keyboard::Back)];
        }

        let mut replies = vec![Reply::with_keyboard(t.get("news-header"), Keyboard::Back)];
        for entry in &entries {
            replies.push(Reply::text(
                t.get_with_args("news-item", &[("text", &entry.text)]),
            ));
            replies.extend(entry.attachments().into_iter().map(Reply::Attachment));
        }
        replies
    }

    async fn forward_help_request(
        &self,
        dialogue: &ConversationDialogue,
        sender: Option<&str>,
        submission: Submission,
    ) -> Result<Vec<Reply>> {
        let t = &self.catalog;
        let message = OperatorMessage {
            text: t.get_with_args(
                "operator-help",
                &[
                    ("user", &self.sender_label(sender)),
                    ("text", &self.body_text(&submission)),
                ],
            ),
            attachment: submission.attachment,
        };

        let reply = match self.gateway.forward(message).await {
            Ok(()) => {
                info!(chat_id = %dialogue.chat_id(), "Help request forwarded to operators");
                t.get("help-sent")
            }
            Err(e) => {
                error!(chat_id = %dialogue.chat_id(), error = %e, "Failed to forward help request");
                t.get("send-failed")
            }
        };

        dialogue.reset().await?;
        Ok(vec![Reply::with_keyboard(reply, Keyboard::Main)])
    }

    async fn forward_free_request(
        &self,
        dialogue: &ConversationDialogue,
        sender: Option<&str>,
        category: String,
        submission: Submission,
    ) -> Result<Vec<Reply>> {
        let t = &self.catalog;
        let request_id = allocate_request_id(Utc::now()).to_string();
        let message = OperatorMessage {
            text: t.get_with_args(
                "operator-free",
                &[
                    ("request_id", &request_id),
                    ("category", &category),
                    ("user", &self.sender_label(sender)),
                    ("text", &self.body_text(&submission)),
                ],
            ),
            attachment: submission.attachment,
        };

        let reply = match self.gateway.forward(message).await {
            Ok(()) => {
                info!(chat_id = %dialogue.chat_id(), request_id = %request_id, category = %category, "Product request forwarded to operators");
                t.get_with_args("free-sent", &[("request_id", &request_id)])
            }
            Err(e) => {
                error!(chat_id = %dialogue.chat_id(), request_id = %request_id, error = %e, "Failed to forward product request");
                t.get("send-failed")
            }
        };

        dialogue.reset().await?;
        Ok(vec![Reply::with_keyboard(reply, Keyboard::Main)])
    }

    async fn publish_news(
        &self,
        dialogue: &ConversationDialogue,
        text: String,
        attachment: Option<Attachment>,
    ) -> Result<Vec<Reply>> {
        let t = &self.catalog;
        let reply = match self.news.append_one(NewsEntry::new(text.clone(), attachment)).await {
            Ok(()) => t.get_with_args("news-added", &[("text", &text)]),
            Err(e) => {
                error!(chat_id = %dialogue.chat_id(), error = %e, "Failed to save news entry");
                t.get("news-save-failed")
            }
        };

        dialogue.reset().await?;
        Ok(vec![Reply::text(reply)])
    }

    fn sender_label(&self, sender: Option<&str>) -> String {
        sender
            .map(str::to_string)
            .unwrap_or_else(|| self.catalog.get("operator-unknown-user"))
    }

    fn body_text(&self, submission: &Submission) -> String {
        submission
            .trimmed_text()
            .map(str::to_string)
            .unwrap_or_else(|| self.catalog.get("operator-no-text"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_is_unix_seconds() {
        let now = DateTime::from_timestamp(1_700_000_000, 999_000_000).unwrap();
        assert_eq!(allocate_request_id(now), 1_700_000_000);
    }
}
