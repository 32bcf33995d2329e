//! `ChatClient` backed by the `irc` crate.
//!
//! The crate owns registration, PING/PONG and line decoding; this adapter
//! only maps its messages onto [`IrcEvent`].

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use futures::StreamExt;
use irc::client::prelude::{Client, Command, Config, Message, Response};
use irc::client::{ClientStream, Sender};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::{ChatClient, ClientError, IrcEvent};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const EVENT_BUFFER: usize = 256;
const DEFAULT_PORT: u16 = 6667;

/// IRC client owning at most one live connection.
pub struct IrcClient {
    nick: String,
    /// Outgoing side of the current connection.
    sender: Mutex<Option<Sender>>,
}

impl IrcClient {
    pub fn new(nick: impl Into<String>) -> Self {
        Self {
            nick: nick.into(),
            sender: Mutex::new(None),
        }
    }

    fn config_for(&self, server: &str) -> Config {
        let (host, port) = split_server(server);

        let mut config = Config::default();
        config.server = Some(host.to_string());
        config.port = Some(port);
        config.use_tls = Some(false);
        config.nickname = Some(self.nick.clone());
        config.username = Some(self.nick.clone());
        config.realname = Some(self.nick.clone());
        config
    }

    fn send(&self, command: Command) -> Result<(), ClientError> {
        let sender = self.sender.lock();
        let sender = sender.as_ref().ok_or(ClientError::NotConnected)?;
        sender.send(command)?;
        Ok(())
    }
}

#[async_trait]
impl ChatClient for IrcClient {
    async fn connect(&self, server: &str) -> Result<mpsc::Receiver<IrcEvent>, ClientError> {
        let config = self.config_for(server);
        let mut client = tokio::time::timeout(CONNECT_TIMEOUT, Client::from_config(config))
            .await
            .map_err(|_| ClientError::Timeout)??;

        client.identify()?;
        let stream = client.stream()?;
        *self.sender.lock() = Some(client.sender());

        let (events, rx) = mpsc::channel(EVENT_BUFFER);
        tokio::spawn(read_loop(stream, events));
        Ok(rx)
    }

    async fn join(&self, channel: &str) -> Result<(), ClientError> {
        self.send(Command::JOIN(channel.to_string(), None, None))
    }

    async fn privmsg(&self, target: &str, text: &str) -> Result<(), ClientError> {
        // One PRIVMSG per line so message text cannot smuggle in commands
        for line in text.split(['\r', '\n']).filter(|l| !l.is_empty()) {
            self.send(Command::PRIVMSG(target.to_string(), line.to_string()))?;
        }
        Ok(())
    }

    fn nick(&self) -> String {
        self.nick.clone()
    }
}

/// Split `host:port`, falling back to the plain-text IRC port.
fn split_server(server: &str) -> (&str, u16) {
    match server.rsplit_once(':') {
        Some((host, port)) => match port.parse() {
            Ok(port) => (host, port),
            Err(_) => (server, DEFAULT_PORT),
        },
        None => (server, DEFAULT_PORT),
    }
}

/// Translate one server message; `None` for anything the bot ignores.
fn to_event(message: &Message) -> Option<IrcEvent> {
    match &message.command {
        Command::Response(Response::RPL_WELCOME, _) => Some(IrcEvent::Connected),
        Command::JOIN(channel, ..) => Some(IrcEvent::Joined {
            nick: message.source_nickname()?.to_string(),
            channel: channel.clone(),
        }),
        Command::PRIVMSG(target, text) => Some(IrcEvent::Privmsg {
            nick: message.source_nickname()?.to_string(),
            target: target.clone(),
            text: text.clone(),
            time: Utc::now(),
        }),
        _ => None,
    }
}

async fn read_loop(mut stream: ClientStream, events: mpsc::Sender<IrcEvent>) {
    // Undecodable bytes arrive as replacement characters. A line that does
    // not parse is skipped; any other error ends the session.
    while let Some(message) = stream.next().await {
        let message = match message {
            Ok(message) => message,
            Err(e @ irc::error::Error::InvalidMessage { .. }) => {
                warn!("Skipping bad message from server: {}", e);
                continue;
            }
            Err(e) => {
                warn!("Connection to server failed: {}", e);
                break;
            }
        };
        debug!("<< {}", message.to_string().trim_end());

        if let Some(event) = to_event(&message)
            && events.send(event).await.is_err()
        {
            break;
        }
    }

    let _ = events.send(IrcEvent::Disconnected).await;
}
