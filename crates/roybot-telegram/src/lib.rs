//! Telegram bot for the Roy transcoder.
//!
//! This crate provides a Telegram bot that lets an operator check the
//! transcoder's health, enqueue transcode jobs, poll job and queue status,
//! and list the platform's tenants from a chat.
//!
//! # Environment Variables
//!
//! Required:
//! - `TELEGRAM_BOT_TOKEN`: Bot token from @BotFather
//!
//! Optional:
//! - `DIR`: Path of the env file to load (default: `./.env`)
//! - `TRANSCODER_URL`, `TENANTS_RELEASE_URL`, `TENANTS_STAGE_URL`: Service URLs
//!
//! # Example
//!
//! ```no_run
//! use roybot_telegram::{BotConfig, TranscoderBot};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BotConfig::from_env()?;
//!     let bot = TranscoderBot::new(&config);
//!     bot.start_polling().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Commands
//!
//! - `/help`, `/start` - Show available commands and the shortcut keyboard
//! - `/transcoder_healthcheck` - Check the transcoder is up
//! - `/transcoder_job <tenant> <id> <basename> <type> <environment>` - Enqueue a job
//! - `/transcoder_job_status <tenant> <id> <type>` - Status of one job
//! - `/transcoder_status` - Queue size and current video
//! - `/api_tenants` - List production tenants

pub mod args;
pub mod bot;
pub mod config;
pub mod error;
pub mod handlers;
pub mod keyboard;
pub mod reply;

#[cfg(test)]
mod testing;

pub use args::{ArgsError, CommandSchema, JobQuery};
pub use bot::{schema, spawn_handler, TranscoderBot};
pub use config::{load_env_file, BotConfig};
pub use error::{BotError, Result};
pub use handlers::{handle_command, help_reply, Command};
pub use reply::{split_message, Reply, MAX_MESSAGE_LEN};
