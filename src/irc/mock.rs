//! Scripted in-memory client for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use super::{ChatClient, ClientError, IrcEvent};

/// What the next `connect` call does.
#[derive(Debug, Clone, Copy)]
pub enum MockConnect {
    /// Refuse the connection.
    Fail,
    /// Connect, then drop the link straight away.
    Hangup,
    /// Connect and stay connected.
    Hold,
}

/// One outbound call, in the order the bot made it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockAction {
    Join(String),
    Privmsg(String, String),
}

pub struct MockClient {
    nick: String,
    script: Mutex<VecDeque<MockConnect>>,
    attempts: AtomicU32,
    actions: Mutex<Vec<MockAction>>,
    held: Mutex<Vec<mpsc::Sender<IrcEvent>>>,
}

impl MockClient {
    /// Client whose connects follow `script`; an exhausted script fails.
    pub fn new(nick: &str, script: impl IntoIterator<Item = MockConnect>) -> Self {
        Self {
            nick: nick.to_string(),
            script: Mutex::new(script.into_iter().collect()),
            attempts: AtomicU32::new(0),
            actions: Mutex::new(Vec::new()),
            held: Mutex::new(Vec::new()),
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Every join and message so far, in call order.
    pub fn actions(&self) -> Vec<MockAction> {
        self.actions.lock().clone()
    }

    /// Every `(target, text)` sent so far.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.actions()
            .into_iter()
            .filter_map(|action| match action {
                MockAction::Privmsg(target, text) => Some((target, text)),
                MockAction::Join(_) => None,
            })
            .collect()
    }

    pub fn joined(&self) -> Vec<String> {
        self.actions()
            .into_iter()
            .filter_map(|action| match action {
                MockAction::Join(channel) => Some(channel),
                MockAction::Privmsg(..) => None,
            })
            .collect()
    }
}

#[async_trait]
impl ChatClient for MockClient {
    async fn connect(&self, _server: &str) -> Result<mpsc::Receiver<IrcEvent>, ClientError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let step = self.script.lock().pop_front().unwrap_or(MockConnect::Fail);

        let (tx, rx) = mpsc::channel(8);
        match step {
            MockConnect::Fail => {
                let refused = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
                return Err(ClientError::Connect(refused.into()));
            }
            MockConnect::Hangup => {
                let _ = tx.send(IrcEvent::Connected).await;
                let _ = tx.send(IrcEvent::Disconnected).await;
            }
            MockConnect::Hold => {
                let _ = tx.send(IrcEvent::Connected).await;
                self.held.lock().push(tx);
            }
        }
        Ok(rx)
    }

    async fn join(&self, channel: &str) -> Result<(), ClientError> {
        self.actions.lock().push(MockAction::Join(channel.to_string()));
        Ok(())
    }

    async fn privmsg(&self, target: &str, text: &str) -> Result<(), ClientError> {
        self.actions
            .lock()
            .push(MockAction::Privmsg(target.to_string(), text.to_string()));
        Ok(())
    }

    fn nick(&self) -> String {
        self.nick.clone()
    }
}
