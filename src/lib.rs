//! # Sourcing Bot
//!
//! A Telegram bot for a cross-border sourcing service: users pick a product
//! category or ask for help, their requests are relayed to an operator
//! group, and an administrator publishes a small news feed.

pub mod bot;
pub mod config;
pub mod dialogue;
pub mod errors;
pub mod events;
pub mod gateway;
pub mod liveness;
pub mod localization;
pub mod menu;
pub mod news_store;
pub mod session;
