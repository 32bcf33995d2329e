//! Chat message as it is written to the daily log.

use std::fmt;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// A single logged line: who said what, and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub timestamp: DateTime<Utc>,
    pub author: String,
    pub text: String,
}

impl Message {
    pub fn new(author: impl Into<String>, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            author: author.into(),
            text: text.into(),
        }
    }

    /// Calendar day of this message in `tz`, as `YYYY-MM-DD`.
    ///
    /// Fixed width, so keys sort chronologically.
    pub fn rotation_key(&self, tz: Tz) -> String {
        self.timestamp.with_timezone(&tz).format("%Y-%m-%d").to_string()
    }

    /// Render the log line (without trailing newline), e.g. `[3:04PM] nick: hi`.
    pub fn format_line(&self, tz: Tz) -> String {
        LogLine { msg: self, tz }.to_string()
    }
}

struct LogLine<'a> {
    msg: &'a Message,
    tz: Tz,
}

impl fmt::Display for LogLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let local = self.msg.timestamp.with_timezone(&self.tz);
        // One message is always one line
        let text = self.msg.text.replace(['\r', '\n'], " ");
        write!(
            f,
            "[{}] {}: {}",
            local.format("%-I:%M%p"),
            self.msg.author,
            text
        )
    }
}

/// File name for a rotation key.
pub fn log_file_name(key: &str) -> String {
    format!("{}.log", key)
}
