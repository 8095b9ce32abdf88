//! Startup configuration.
//!
//! Configuration is read once, before the bot starts, and handed to the
//! constructors that need it:
//!
//! 1. an env file is loaded (explicit path, else `./.env`, else
//!    `<config dir>/roybot/.env`);
//! 2. [`BotConfig`] is built from the resulting environment.
//!
//! # Environment Variables
//!
//! Required:
//! - `TELEGRAM_BOT_TOKEN`: Bot token from @BotFather (`TELEGRAM_BOT_KEY` is
//!   accepted too)
//!
//! Optional:
//! - `TRANSCODER_URL`: Transcoder base URL
//! - `TENANTS_RELEASE_URL`: Production tenant directory URL
//! - `TENANTS_STAGE_URL`: Staging tenant directory URL

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use roybot_client::endpoints::{
    DEFAULT_TENANTS_RELEASE_URL, DEFAULT_TENANTS_STAGE_URL, DEFAULT_TRANSCODER_URL,
};
use roybot_client::Endpoints;
use tracing::debug;

use crate::error::{BotError, Result};

/// Environment variable holding the bot token.
pub const TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

/// Older name for the bot token variable.
pub const LEGACY_TOKEN_ENV: &str = "TELEGRAM_BOT_KEY";

pub const TRANSCODER_URL_ENV: &str = "TRANSCODER_URL";
pub const TENANTS_RELEASE_URL_ENV: &str = "TENANTS_RELEASE_URL";
pub const TENANTS_STAGE_URL_ENV: &str = "TENANTS_STAGE_URL";

/// Long-poll timeout for Telegram updates.
pub const POLL_TIMEOUT: Duration = Duration::from_secs(10);

const ENV_FILE_NAME: &str = ".env";
const CONFIG_SUBDIR: &str = "roybot";

/// Everything the bot needs to run.
#[derive(Clone)]
pub struct BotConfig {
    pub token: String,
    pub endpoints: Endpoints,
    pub poll_timeout: Duration,
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("endpoints", &self.endpoints)
            .field("poll_timeout", &self.poll_timeout)
            .finish()
    }
}

impl BotConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = present(TOKEN_ENV)
            .or_else(|| present(LEGACY_TOKEN_ENV))
            .ok_or(BotError::NoToken)?;

        let transcoder =
            present(TRANSCODER_URL_ENV).unwrap_or_else(|| DEFAULT_TRANSCODER_URL.to_string());
        let release = present(TENANTS_RELEASE_URL_ENV)
            .unwrap_or_else(|| DEFAULT_TENANTS_RELEASE_URL.to_string());
        let stage = present(TENANTS_STAGE_URL_ENV)
            .unwrap_or_else(|| DEFAULT_TENANTS_STAGE_URL.to_string());

        let endpoints = Endpoints::new(&transcoder, &release, &stage)?;

        Ok(Self {
            token: token.trim().to_string(),
            endpoints,
            poll_timeout: POLL_TIMEOUT,
        })
    }
}

/// Env files tried, in order, when no explicit path is given.
pub fn default_env_files() -> Vec<PathBuf> {
    let mut files = vec![PathBuf::from(ENV_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        files.push(dir.join(CONFIG_SUBDIR).join(ENV_FILE_NAME));
    }
    files
}

/// Load an env file into the process environment.
///
/// An explicit path must exist and parse. Without one, the first existing
/// default file is loaded and a missing file is not an error. Variables
/// already set in the environment win over file contents.
///
/// Returns the path that was loaded, if any.
pub fn load_env_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        // Only UTF-8 paths can carry a `~` to expand.
        let expanded = match path.to_str() {
            Some(text) => PathBuf::from(shellexpand::tilde(text).into_owned()),
            None => path.to_path_buf(),
        };
        dotenvy::from_path(&expanded).map_err(|source| BotError::EnvFile {
            path: expanded.clone(),
            source,
        })?;
        debug!(path = %expanded.display(), "Loaded env file");
        return Ok(Some(expanded));
    }

    for candidate in default_env_files() {
        if candidate.is_file() {
            dotenvy::from_path(&candidate).map_err(|source| BotError::EnvFile {
                path: candidate.clone(),
                source,
            })?;
            debug!(path = %candidate.display(), "Loaded env file");
            return Ok(Some(candidate));
        }
    }

    Ok(None)
}
