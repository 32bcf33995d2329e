//! Utility functions.
//!
//! Collection of helper functions used across the bot.

/// Marker that starts every channel name.
pub const CHANNEL_MARKER: char = '#';

/// Check whether a target is a channel (as opposed to a nick).
pub fn is_channel(target: &str) -> bool {
    target.starts_with(CHANNEL_MARKER)
}

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
