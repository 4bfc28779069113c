//! Telegram implementation of the operator gateway

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{FileId, InputFile};
use tracing::{debug, info};

use crate::errors::ForwardError;
use crate::events::Attachment;
use crate::gateway::{OperatorGateway, OperatorMessage};

/// Forwards requests into the configured operator group chat
#[derive(Clone)]
pub struct TelegramGateway {
    bot: Bot,
    operator_group: ChatId,
}

impl TelegramGateway {
    pub fn new(bot: Bot, operator_group: ChatId) -> Self {
        Self {
            bot,
            operator_group,
        }
    }
}

#[async_trait]
impl OperatorGateway for TelegramGateway {
    async fn forward(&self, message: OperatorMessage) -> Result<(), ForwardError> {
        info!(chat_id = %self.operator_group, "Sending request to operator group");

        let sent = self
            .bot
            .send_message(self.operator_group, message.text)
            .await?;
        debug!(message_id = ?sent.id, "Operator message sent");

        match message.attachment {
            Some(Attachment::Photo(id)) => {
                self.bot
                    .send_photo(self.operator_group, InputFile::file_id(FileId(id)))
                    .await?;
            }
            Some(Attachment::Document(id)) => {
                self.bot
                    .send_document(self.operator_group, InputFile::file_id(FileId(id)))
                    .await?;
            }
            None => {}
        }

        Ok(())
    }
}
