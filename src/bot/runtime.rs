//! Bot runtime - the reconnect loop.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::{error, info, warn};

use super::dispatcher::{dispatch, Bot};

/// Connection lifecycle as seen by the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("maximum number of connection attempts to {server} exceeded ({attempts})")]
    AttemptsExhausted { server: String, attempts: u32 },
}

/// Keeps the bot connected, retrying with a fixed delay.
pub struct ConnectionManager {
    bot: Bot,
    server: String,
    max_attempts: u32,
    retry_delay: Duration,
    state: Arc<RwLock<ConnectionState>>,
}

impl ConnectionManager {
    pub fn new(bot: Bot) -> Self {
        let config = bot.config();
        let server = config.server.clone();
        let max_attempts = config.max_connect_attempts.max(1);
        let retry_delay = config.reconnect_delay;

        Self {
            bot,
            server,
            max_attempts,
            retry_delay,
            state: Arc::new(RwLock::new(ConnectionState::Disconnected)),
        }
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.read()
    }

    fn set_state(&self, state: ConnectionState) {
        *self.state.write() = state;
    }

    /// Connect and stay connected.
    ///
    /// Only returns once `max_attempts` connects in a row have failed.
    pub async fn run(&self) -> Result<(), ConnectionError> {
        let mut failures = 0u32;

        loop {
            self.set_state(ConnectionState::Connecting);

            let events = match self.bot.client().connect(&self.server).await {
                Ok(events) => events,
                Err(e) => {
                    self.set_state(ConnectionState::Disconnected);
                    failures += 1;
                    warn!(
                        "Connection to {} failed ({}/{}): {}",
                        self.server, failures, self.max_attempts, e
                    );

                    if failures >= self.max_attempts {
                        error!("Giving up on {}", self.server);
                        return Err(ConnectionError::AttemptsExhausted {
                            server: self.server.clone(),
                            attempts: failures,
                        });
                    }

                    tokio::time::sleep(self.retry_delay).await;
                    continue;
                }
            };

            failures = 0;
            self.set_state(ConnectionState::Connected);
            info!("Connected to {}", self.server);

            tokio::spawn(dispatch(self.bot.clone(), events));
            self.bot.disconnected().await;

            self.set_state(ConnectionState::Disconnected);
            info!("Disconnected from {}, reconnecting", self.server);
        }
    }
}
