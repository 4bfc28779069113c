//! # Configuration Module
//!
//! Runtime settings read from the environment (after `.env` is loaded).

use std::path::PathBuf;

use teloxide::types::ChatId;

use crate::errors::ConfigError;
use crate::menu::{default_categories, Category};

// Constants for configuration defaults
pub const DEFAULT_NEWS_FILE: &str = "news.json";
pub const DEFAULT_PORT: u16 = 5000;

/// Everything the process needs to run
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot API token
    pub bot_token: String,
    /// Chat that receives forwarded user requests
    pub operator_group: ChatId,
    /// JSON file holding the news feed
    pub news_file: PathBuf,
    /// Port for the liveness endpoint
    pub port: u16,
    /// Categories offered in the main menu
    pub categories: Vec<Category>,
}

impl Config {
    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = lookup("TELEGRAM_BOT_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::Missing("TELEGRAM_BOT_TOKEN"))?;

        let group = lookup("TELEGRAM_GROUP_ID").ok_or(ConfigError::Missing("TELEGRAM_GROUP_ID"))?;
        let operator_group = group
            .trim()
            .parse::<i64>()
            .map(ChatId)
            .map_err(|_| ConfigError::Invalid {
                name: "TELEGRAM_GROUP_ID",
                value: group.clone(),
            })?;

        let news_file = lookup("NEWS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_NEWS_FILE));

        let port = match lookup("PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: value.clone(),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            bot_token,
            operator_group,
            news_file,
            port,
            categories: default_categories(),
        })
    }
}
