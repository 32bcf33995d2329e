//! IRC module - the chat protocol seam.
//!
//! The bot only talks to the network through [`ChatClient`]. A connection
//! delivers its events in order on a channel, consumed by one dispatcher
//! task per connection.

mod client;
#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::mpsc;

pub use client::IrcClient;

/// Events delivered by a live connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrcEvent {
    /// Registration finished; the server accepts commands.
    Connected,
    /// The connection is gone. Always the last event.
    Disconnected,
    /// `nick` joined `channel`.
    Joined { nick: String, channel: String },
    /// `nick` sent `text` to `target` (a channel, or our own nick).
    Privmsg {
        nick: String,
        target: String,
        text: String,
        time: DateTime<Utc>,
    },
}

/// Errors raised by a chat client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("irc: {0}")]
    Connect(#[from] ::irc::error::Error),

    #[error("connection attempt timed out")]
    Timeout,

    #[error("not connected")]
    NotConnected,
}

/// Minimal chat protocol client.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Open a connection and return its event stream.
    async fn connect(&self, server: &str) -> Result<mpsc::Receiver<IrcEvent>, ClientError>;

    /// Join a channel on the current connection.
    async fn join(&self, channel: &str) -> Result<(), ClientError>;

    /// Send a message to a channel or nick.
    async fn privmsg(&self, target: &str, text: &str) -> Result<(), ClientError>;

    /// Our own nick.
    fn nick(&self) -> String;
}
