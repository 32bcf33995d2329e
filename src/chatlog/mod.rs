//! Chat log module - messages and the daily-rotating writer.

mod message;
mod writer;

pub use message::{log_file_name, Message};
pub use writer::{log_channel, LogSender, LogWriter};
