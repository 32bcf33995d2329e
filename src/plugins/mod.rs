//! Plugin system for command handlers.
//!
//! Add new plugins by:
//! 1. Creating a new file in this directory
//! 2. Adding `pub mod your_plugin;` below
//! 3. Registering the handler in `CommandRegistry::with_defaults()`
//!
//! The registry only does exact matches. Prefix commands (`!wolfram`,
//! `!mathbin`) are matched by the dispatcher and live here as helpers.

pub mod coin;
pub mod mathbin;
pub mod proof;
pub mod wolfram;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::bot::Bot;
use crate::chatlog::Message;

/// A command triggered by an exact chat line.
#[async_trait]
pub trait Command: Send + Sync {
    /// Run the command. `target` is where replies should go.
    async fn execute(&self, bot: &Bot, target: &str, msg: &Message) -> anyhow::Result<()>;
}

/// Exact-match trigger table.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in commands.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("!coin", coin::CoinCommand);
        registry.register("!proof", proof::ProofCommand);
        registry
    }

    /// Register a command. A second registration for the same trigger wins.
    pub fn register(&mut self, trigger: impl Into<String>, command: impl Command + 'static) {
        let trigger = trigger.into();
        if self.commands.insert(trigger.clone(), Arc::new(command)).is_some() {
            debug!("Command {} registered twice, keeping the latest", trigger);
        }
    }

    /// Look up the command for an exact chat line.
    pub fn get(&self, text: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(text).cloned()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Reply(&'static str);

    #[async_trait]
    impl Command for Reply {
        async fn execute(&self, bot: &Bot, target: &str, _msg: &Message) -> anyhow::Result<()> {
            bot.send(target, self.0).await;
            Ok(())
        }
    }

    #[test]
    fn test_exact_match_only() {
        let registry = CommandRegistry::with_defaults();

        assert!(registry.get("!coin").is_some());
        assert!(registry.get("!coins").is_none());
        assert!(registry.get("!coin ").is_none());
        assert!(registry.get("!COIN").is_none());
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test]
    async fn test_last_registration_wins() {
        use crate::bot::testing::test_bot;

        let mut registry = CommandRegistry::new();
        registry.register("!hi", Reply("first"));
        registry.register("!hi", Reply("second"));
        assert_eq!(registry.len(), 1);

        let (bot, client, _log) = test_bot(CommandRegistry::new());
        let msg = Message::new("alice", "!hi", chrono::Utc::now());
        registry
            .get("!hi")
            .unwrap()
            .execute(&bot, "alice", &msg)
            .await
            .unwrap();

        assert_eq!(client.sent(), vec![("alice".to_string(), "second".to_string())]);
    }
}
