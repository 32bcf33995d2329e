//! Test helpers for building a bot around the mock client.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::Bot;
use crate::chatlog::{log_channel, Message};
use crate::config::Config;
use crate::irc::mock::{MockClient, MockConnect};
use crate::plugins::CommandRegistry;

/// Bot with default config, a mock client named `chanlog`, and the
/// receiving end of its log queue.
pub fn test_bot(commands: CommandRegistry) -> (Bot, Arc<MockClient>, mpsc::Receiver<Message>) {
    test_bot_with(Config::default(), commands)
}

pub fn test_bot_with(
    config: Config,
    commands: CommandRegistry,
) -> (Bot, Arc<MockClient>, mpsc::Receiver<Message>) {
    scripted_bot(config, commands, Vec::new())
}

/// Bot whose client follows a connect script.
pub fn scripted_bot(
    config: Config,
    commands: CommandRegistry,
    script: impl IntoIterator<Item = MockConnect>,
) -> (Bot, Arc<MockClient>, mpsc::Receiver<Message>) {
    let client = Arc::new(MockClient::new("chanlog", script));
    let (tx, rx) = log_channel();
    let bot = Bot::new(client.clone(), Arc::new(config), tx, commands).unwrap();
    (bot, client, rx)
}
