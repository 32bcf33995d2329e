//! Chanlog - IRC channel logger with a web archive
//!
//! Joins the configured channels, writes every channel line to one file
//! per day, answers a few trigger commands, and serves the files over HTTP.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `irc` - Protocol client seam and its `irc` crate adapter
//! - `chatlog` - Messages and the daily-rotating log writer
//! - `bot` - Bot handle, event dispatcher, reconnect loop
//! - `plugins` - Command handlers (extensible)
//! - `events` - Event handlers (extensible)
//! - `archive` - Web archive of the log files
//! - `utils` - Utility functions

mod archive;
mod bot;
mod chatlog;
mod config;
mod events;
mod irc;
mod plugins;
mod utils;

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use bot::{Bot, ConnectionManager};
use chatlog::LogWriter;
use config::Config;
use crate::irc::IrcClient;
use plugins::CommandRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("chanlog=info,reqwest=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    info!("Starting chanlog...");

    let config = Config::from_env()?;
    info!("Configuration loaded successfully");
    info!("Server: {}, nick: {}", config.server, config.nick);
    info!("Channels: {:?}", config.channels);

    if config.channels.len() > 1 {
        warn!("Several channels configured; they all share one daily log");
    }

    tokio::fs::create_dir_all(&config.log_dir)
        .await
        .with_context(|| format!("cannot create log directory {}", config.log_dir.display()))?;

    // Single writer for all chat log files
    let (log, _writer) = LogWriter::spawn(config.log_dir.clone(), config.log_timezone);
    info!("Chat log writer started (timezone {})", config.log_timezone);

    // Archive server
    let listener = TcpListener::bind(&config.http_listen)
        .await
        .with_context(|| format!("cannot listen on {}", config.http_listen))?;
    let log_dir = config.log_dir.clone();
    tokio::spawn(async move {
        if let Err(e) = archive::serve(listener, log_dir).await {
            error!("Archive server stopped: {}", e);
        }
    });

    let config = Arc::new(config);
    let client = Arc::new(IrcClient::new(config.nick.clone()));
    let commands = CommandRegistry::with_defaults();
    info!("{} commands registered", commands.len());
    let bot = Bot::new(client, config, log, commands)?;
    info!("Bot initialized");

    let manager = ConnectionManager::new(bot);

    tokio::select! {
        result = manager.run() => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutting down..."),
    }

    Ok(())
}
