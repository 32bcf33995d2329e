//! Log writer - the single owner of the open day file.
//!
//! All producers push into one bounded queue; this task drains it in
//! order and appends each line to the file of the message's calendar day.

use std::io;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::message::{log_file_name, Message};

/// Queue capacity. Producers wait when it is full.
pub const LOG_QUEUE_CAPACITY: usize = 512;

/// Producer side of the log queue.
pub type LogSender = mpsc::Sender<Message>;

/// Create the bounded log queue.
pub fn log_channel() -> (LogSender, mpsc::Receiver<Message>) {
    mpsc::channel(LOG_QUEUE_CAPACITY)
}

/// The currently open day file.
struct OpenLog {
    key: String,
    file: File,
}

/// Appends queued messages to per-day files in `dir`.
pub struct LogWriter {
    dir: PathBuf,
    tz: Tz,
    /// Latest day seen, kept even when its file failed to open.
    day: Option<String>,
    open: Option<OpenLog>,
}

impl LogWriter {
    pub fn new(dir: impl Into<PathBuf>, tz: Tz) -> Self {
        Self {
            dir: dir.into(),
            tz,
            day: None,
            open: None,
        }
    }

    /// Spawn the writer task and return the queue to feed it.
    ///
    /// The task ends (closing the open file) once every sender is dropped.
    pub fn spawn(dir: impl Into<PathBuf>, tz: Tz) -> (LogSender, JoinHandle<()>) {
        let (tx, rx) = log_channel();
        let writer = Self::new(dir, tz);
        let handle = tokio::spawn(writer.run(rx));
        (tx, handle)
    }

    /// Drain the queue until it closes.
    pub async fn run(mut self, mut rx: mpsc::Receiver<Message>) {
        info!("Log writer started in {}", self.dir.display());

        while let Some(msg) = rx.recv().await {
            if let Err(e) = self.write(&msg).await {
                warn!("Dropping log line from {}: {}", msg.author, e);
            }
        }

        self.close().await;
        info!("Log writer stopped");
    }

    async fn write(&mut self, msg: &Message) -> io::Result<()> {
        let key = msg.rotation_key(self.tz);

        // Days only move forward; a straggler from an earlier day goes
        // into the latest day's file.
        let day = match &self.day {
            Some(day) if *day >= key => day.clone(),
            _ => {
                self.day = Some(key.clone());
                key.clone()
            }
        };
        if day != key {
            debug!("Late message for {} written to {}", key, day);
        }

        if self.open.as_ref().is_none_or(|open| open.key != day) {
            self.close().await;
            let file = open_append(&self.dir.join(log_file_name(&day))).await?;
            info!("Rotated chat log to {}", log_file_name(&day));
            self.open = Some(OpenLog { key: day, file });
        }

        let Some(open) = self.open.as_mut() else {
            return Ok(());
        };

        let mut line = msg.format_line(self.tz);
        line.push('\n');
        open.file.write_all(line.as_bytes()).await?;
        open.file.flush().await
    }

    async fn close(&mut self) {
        if let Some(mut open) = self.open.take()
            && let Err(e) = open.file.flush().await
        {
            warn!("Failed to flush {}: {}", log_file_name(&open.key), e);
        }
    }
}

async fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
}
