//! Event dispatcher.
//!
//! Holds the shared [`Bot`] handle and turns connection events into
//! bot actions: joining, welcoming, logging and answering commands.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{mpsc, Notify};
use tracing::{debug, info, warn};

use crate::chatlog::{LogSender, Message};
use crate::config::Config;
use crate::events;
use crate::irc::{ChatClient, IrcEvent};
use crate::plugins::{mathbin, wolfram, CommandRegistry};
use crate::utils::is_channel;

/// Exact trigger for the archive link.
const LOG_COMMAND: &str = "!log";

/// Shared bot handle.
///
/// Cheap to clone; every clone talks to the same client, log queue and
/// disconnect signal.
#[derive(Clone)]
pub struct Bot {
    client: Arc<dyn ChatClient>,

    /// Producer side of the chat log queue.
    log: LogSender,

    commands: Arc<CommandRegistry>,

    /// HTTP client for remote previews (bounded by the fetch timeout).
    http: reqwest::Client,

    config: Arc<Config>,

    /// Single-slot "connection lost" signal.
    disconnect: Arc<Notify>,
}

impl Bot {
    /// Create a new bot handle.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(
        client: Arc<dyn ChatClient>,
        config: Arc<Config>,
        log: LogSender,
        commands: CommandRegistry,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .build()?;

        Ok(Self {
            client,
            log,
            commands: Arc::new(commands),
            http,
            config,
            disconnect: Arc::new(Notify::new()),
        })
    }

    pub fn client(&self) -> &dyn ChatClient {
        self.client.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn nick(&self) -> String {
        self.client.nick()
    }

    /// Send a message. Channel messages are logged under our own nick.
    pub async fn send(&self, target: &str, text: &str) {
        if let Err(e) = self.client.privmsg(target, text).await {
            warn!("Failed to send to {}: {}", target, e);
            return;
        }

        if is_channel(target) {
            self.record(Message::new(self.nick(), text, Utc::now())).await;
        }
    }

    /// Queue a message for the chat log, waiting while the queue is full.
    pub async fn record(&self, msg: Message) {
        if self.log.send(msg).await.is_err() {
            warn!("Chat log writer is gone, message not logged");
        }
    }

    /// Tell the connection manager that the link dropped.
    pub fn signal_disconnect(&self) {
        self.disconnect.notify_one();
    }

    /// Wait for the next disconnect signal.
    pub async fn disconnected(&self) {
        self.disconnect.notified().await;
    }
}

/// Consume one connection's events in order.
///
/// Signals the disconnect exactly once, when the stream ends or reports
/// the disconnect.
pub async fn dispatch(bot: Bot, mut stream: mpsc::Receiver<IrcEvent>) {
    while let Some(event) = stream.recv().await {
        match event {
            IrcEvent::Connected => on_connected(&bot).await,
            IrcEvent::Disconnected => break,
            IrcEvent::Joined { nick, channel } => {
                events::welcome::greet(&bot, &nick, &channel).await;
            }
            IrcEvent::Privmsg {
                nick,
                target,
                text,
                time,
            } => {
                handle_message(&bot, &target, Message::new(nick, text, time)).await;
            }
        }
    }

    debug!("Event stream finished");
    bot.signal_disconnect();
}

/// Identify with NickServ (if configured) and join every channel.
async fn on_connected(bot: &Bot) {
    let config = bot.config();

    if let Some(password) = &config.password
        && let Err(e) = bot
            .client()
            .privmsg("NickServ", &format!("identify {}", password))
            .await
    {
        warn!("Failed to identify with NickServ: {}", e);
    }

    for channel in &config.channels {
        info!("Joining {}", channel);
        if let Err(e) = bot.client().join(channel).await {
            warn!("Failed to join {}: {}", channel, e);
        }
    }
}

/// Handle an incoming chat line addressed to `target`.
pub async fn handle_message(bot: &Bot, target: &str, msg: Message) {
    // Channel lines are logged; private lines are answered privately
    let reply_to = if is_channel(target) {
        bot.record(msg.clone()).await;
        target.to_string()
    } else {
        msg.author.clone()
    };

    if let Some(command) = bot.commands.get(&msg.text) {
        debug!("Running {} for {}", msg.text, msg.author);
        if let Err(e) = command.execute(bot, &reply_to, &msg).await {
            warn!("Command {} failed: {:#}", msg.text, e);
        }
    }

    if let Some(query) = msg.text.strip_prefix(wolfram::PREFIX) {
        bot.send(&reply_to, &wolfram::search_url(query)).await;
    } else if msg.text == LOG_COMMAND {
        bot.send(&msg.author, &bot.config().archive_url).await;
    } else if let Some(code) = msg.text.strip_prefix(mathbin::PREFIX) {
        // Remote fetch runs on its own so the event loop keeps going
        let bot = bot.clone();
        let code = code.to_string();
        tokio::spawn(async move {
            let reply = mathbin::render(bot.http(), &bot.config().mathbin_url, &code).await;
            bot.send(&reply_to, &reply).await;
        });
    }
}
