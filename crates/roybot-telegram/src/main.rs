//! Roy transcoder Telegram bot binary.
//!
//! Start the bot with:
//! ```bash
//! TELEGRAM_BOT_TOKEN=xxx cargo run -p roybot-telegram
//! ```

use std::path::PathBuf;

use clap::Parser;
use roybot_telegram::{load_env_file, BotConfig, TranscoderBot};
use tracing_subscriber::EnvFilter;

/// Roy transcoder bot - operate the transcoder from Telegram
#[derive(Parser, Debug)]
#[command(name = "roybot")]
#[command(about = "Telegram bot relaying commands to the Roy transcoder")]
struct Args {
    /// Env file to load (default: ./.env, then the user config directory)
    #[arg(long, env = "DIR")]
    env_file: Option<PathBuf>,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load the env file before anything reads the environment
    let env_file = load_env_file(args.env_file.as_deref())?;

    // Initialize logging based on verbosity
    let filter = match args.verbose {
        0 => "roybot_telegram=info,roybot_client=info,teloxide=warn",
        1 => "roybot_telegram=debug,roybot_client=debug,teloxide=info",
        2 => "roybot_telegram=trace,roybot_client=trace,teloxide=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(filter))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Some(path) = &env_file {
        tracing::info!(path = %path.display(), "Loaded env file");
    }

    let config = BotConfig::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    let bot = TranscoderBot::new(&config);

    match bot.get_me().await {
        Ok(username) => {
            tracing::info!(username = %username, "Bot initialized successfully");
            println!("\n[robot] Roy Transcoder Bot");
            println!("   Bot: @{}", username);
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to get bot info");
            return Err(e.into());
        }
    }

    println!("\n[phone] Open Telegram and send /help to begin");
    println!("   Press Ctrl+C to stop\n");

    bot.start_polling().await?;

    Ok(())
}
