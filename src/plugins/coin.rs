//! Coin flip command plugin.

use async_trait::async_trait;
use rand::Rng;

use super::Command;
use crate::bot::Bot;
use crate::chatlog::Message;

/// Handle `!coin` - replies "head" or "tail".
pub struct CoinCommand;

#[async_trait]
impl Command for CoinCommand {
    async fn execute(&self, bot: &Bot, target: &str, _msg: &Message) -> anyhow::Result<()> {
        bot.send(target, flip()).await;
        Ok(())
    }
}

fn flip() -> &'static str {
    if rand::thread_rng().gen_bool(0.5) {
        "head"
    } else {
        "tail"
    }
}
