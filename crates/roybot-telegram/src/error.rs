//! Error types for the Telegram bot.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while starting or running the bot.
#[derive(Debug, Error)]
pub enum BotError {
    /// Bot token not provided.
    #[error("Telegram bot token not set. Set TELEGRAM_BOT_TOKEN (or TELEGRAM_BOT_KEY).")]
    NoToken,

    /// An explicitly requested env file could not be loaded.
    #[error("Failed to load env file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    /// Failed to start the bot.
    #[error("Failed to start bot: {0}")]
    BotStartFailed(String),

    /// Remote service client error.
    #[error(transparent)]
    Client(#[from] roybot_client::ClientError),
}

/// Result type for bot operations.
pub type Result<T> = std::result::Result<T, BotError>;

impl From<teloxide::RequestError> for BotError {
    fn from(e: teloxide::RequestError) -> Self {
        BotError::BotStartFailed(e.to_string())
    }
}
