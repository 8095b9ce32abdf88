//! Main Telegram bot implementation.

use std::sync::Arc;
use std::time::Duration;

use roybot_client::{HttpTranscoderClient, TranscoderApi};
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::update_listeners::Polling;
use teloxide::RequestError;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::BotConfig;
use crate::error::Result;
use crate::handlers::{handle_command, help_reply, Command};
use crate::keyboard::shortcut_keyboard;
use crate::reply::Reply;

/// The Telegram bot relaying commands to the transcoder.
pub struct TranscoderBot {
    /// The teloxide bot instance.
    bot: Bot,
    /// Remote services shared by all handler tasks.
    api: Arc<dyn TranscoderApi>,
    /// Long-poll timeout.
    poll_timeout: Duration,
}

impl TranscoderBot {
    /// Create a bot talking to the configured endpoints over HTTP.
    pub fn new(config: &BotConfig) -> Self {
        let api = Arc::new(HttpTranscoderClient::new(config.endpoints.clone()));
        Self::with_api(Bot::new(config.token.clone()), api, config.poll_timeout)
    }

    /// Create a bot with a custom service implementation.
    pub fn with_api(bot: Bot, api: Arc<dyn TranscoderApi>, poll_timeout: Duration) -> Self {
        Self {
            bot,
            api,
            poll_timeout,
        }
    }

    /// Get the bot's username.
    pub async fn get_me(&self) -> Result<String> {
        let me = self.bot.get_me().await?;
        Ok(me.username().to_string())
    }

    /// Run the long-poll receive loop until Ctrl+C.
    ///
    /// Every message is handed to its own task, so the loop never waits on
    /// the transcoder.
    pub async fn start_polling(&self) -> Result<()> {
        info!(timeout = ?self.poll_timeout, "Starting Telegram bot in polling mode...");

        let listener = Polling::builder(self.bot.clone())
            .timeout(self.poll_timeout)
            .build();

        info!("Bot is running! Send /help to begin.");

        Dispatcher::builder(self.bot.clone(), schema(Arc::clone(&self.api)))
            .default_handler(|upd| async move {
                debug!(update_id = ?upd.id, "Ignoring update");
            })
            .enable_ctrlc_handler()
            .build()
            .dispatch_with_listener(
                listener,
                LoggingErrorHandler::with_custom_text("An error from the update listener"),
            )
            .await;

        info!("Bot stopped");
        Ok(())
    }
}

/// Build the update handler tree.
///
/// Messages whose text parses as a [`Command`] go to the command branch. Any
/// other text, including unknown `/commands`, gets the help reply.
pub fn schema(api: Arc<dyn TranscoderApi>) -> UpdateHandler<RequestError> {
    let api_for_text = Arc::clone(&api);

    dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                    let api = Arc::clone(&api);
                    info!(chat_id = %msg.chat.id, command = cmd.name(), "Command received");
                    async move {
                        spawn_handler(bot, msg, Some(cmd), api);
                        respond(())
                    }
                }),
        )
        .branch(
            Update::filter_message()
                .filter(|msg: Message| msg.text().is_some())
                .endpoint(move |bot: Bot, msg: Message| {
                    let api = Arc::clone(&api_for_text);
                    debug!(
                        chat_id = %msg.chat.id,
                        text = ?msg.text(),
                        "Unrecognized text, sending help"
                    );
                    async move {
                        spawn_handler(bot, msg, None, api);
                        respond(())
                    }
                }),
        )
}

/// Handle one message on its own task and send the reply.
///
/// `None` means the text matched no command and gets the help reply. The
/// returned handle belongs to a watcher that logs a panicking handler, so it
/// may be dropped.
pub fn spawn_handler(
    bot: Bot,
    msg: Message,
    command: Option<Command>,
    api: Arc<dyn TranscoderApi>,
) -> JoinHandle<()> {
    let chat_id = msg.chat.id;

    let task = tokio::spawn(async move {
        let username = msg.chat.username().map(str::to_owned);

        let reply = match &command {
            Some(cmd) => handle_command(api.as_ref(), cmd, username.as_deref()).await,
            None => help_reply(),
        };

        if let Err(e) = send_reply(&bot, chat_id, reply).await {
            warn!(chat_id = %chat_id, error = %e, "Failed to send reply");
        }
    });

    tokio::spawn(async move {
        if let Err(e) = task.await {
            if e.is_panic() {
                error!(chat_id = %chat_id, "Handler task panicked");
            } else {
                warn!(chat_id = %chat_id, error = %e, "Handler task did not finish");
            }
        }
    })
}

/// Send a reply, split to Telegram's size limit. The shortcut keyboard, when
/// asked for, rides on the last message.
async fn send_reply(bot: &Bot, chat_id: ChatId, reply: Reply) -> ResponseResult<()> {
    let messages = reply.messages();
    let last = messages.len().saturating_sub(1);

    for (i, text) in messages.into_iter().enumerate() {
        let mut req = bot.send_message(chat_id, text);
        if reply.with_shortcuts && i == last {
            req = req.reply_markup(shortcut_keyboard());
        }
        req.await?;
    }
    Ok(())
}
