//! Welcome event handler.
//!
//! Greets members joining a channel with a private note that the channel
//! is archived, and where.

use tracing::debug;

use crate::bot::Bot;
use crate::utils::is_channel;

/// Handle a member join.
///
/// Our own joins and joins outside channels are ignored.
pub async fn greet(bot: &Bot, nick: &str, channel: &str) {
    if !is_channel(channel) || nick.eq_ignore_ascii_case(&bot.nick()) {
        return;
    }

    debug!("New member {} joined {}", nick, channel);

    let text = format_welcome_text(nick, channel, &bot.config().archive_url);
    bot.send(nick, &text).await;
}

/// Format the welcome message.
pub fn format_welcome_text(nick: &str, channel: &str, archive_url: &str) -> String {
    format!(
        "Hi {}, welcome to {}. This channel is archived at {}",
        nick, channel, archive_url
    )
}
