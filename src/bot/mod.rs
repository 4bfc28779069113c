//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `message_handler`: Turns commands and messages into session events
//! - `callback_handler`: Turns inline keyboard presses into session events
//! - `ui_builder`: Creates keyboards and sends controller replies
//! - `gateway`: Delivers forwarded requests to the operator group

pub mod callback_handler;
pub mod gateway;
pub mod message_handler;
pub mod ui_builder;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

use crate::events::Command;

pub use callback_handler::callback_handler;
pub use gateway::TelegramGateway;
pub use message_handler::{command_handler, message_handler};

/// Dispatch tree: commands first, then any other message, then button presses
pub fn schema() -> UpdateHandler<anyhow::Error> {
    let message_branch = Update::filter_message()
        .branch(teloxide::filter_command::<Command, _>().endpoint(command_handler))
        .branch(dptree::endpoint(message_handler));

    let callback_branch = Update::filter_callback_query().endpoint(callback_handler);

    dptree::entry().branch(message_branch).branch(callback_branch)
}
