//! # Error Types Module
//!
//! Typed errors for the operations whose failures the bot reacts to:
//! forwarding a request to the operator group and appending to the news feed.

use thiserror::Error;

/// Failure to deliver a request to the operator group
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The Telegram API call failed (network, rate limit, invalid chat)
    #[error("telegram request failed: {0}")]
    Telegram(#[from] teloxide::RequestError),
    /// The gateway refused the request for another reason
    #[error("forwarding rejected: {0}")]
    Rejected(String),
}

/// Failure to durably write the news feed
#[derive(Debug, Error)]
pub enum NewsStoreError {
    #[error("news file I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("news serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("existing news file is not valid JSON: {0}")]
    Corrupt(serde_json::Error),
    #[error("failed to replace news file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Invalid or missing configuration value
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}
