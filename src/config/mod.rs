//! Configuration module for the chanlog bot.
//!
//! Loads configuration from environment variables (and an optional `.env`).

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use chrono_tz::Tz;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    // IRC
    pub server: String,
    pub nick: String,

    /// NickServ password. Identification is skipped when unset.
    pub password: Option<String>,

    /// Channels joined on every successful connect.
    pub channels: Vec<String>,

    /// Consecutive connect failures tolerated before giving up.
    pub max_connect_attempts: u32,
    pub reconnect_delay: Duration,

    // Archive
    pub http_listen: String,

    /// Public URL of the archive, sent in `!log` replies and welcomes.
    pub archive_url: String,

    // Chat log
    pub log_dir: PathBuf,
    pub log_timezone: Tz,

    // Remote previews
    pub mathbin_url: String,

    /// Upper bound for remote preview requests.
    pub fetch_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: "irc.euirc.net:6667".to_string(),
            nick: "chanlog".to_string(),
            password: None,
            channels: vec!["#tm".to_string()],
            max_connect_attempts: 5,
            reconnect_delay: Duration::from_secs(5),
            http_listen: "0.0.0.0:8005".to_string(),
            archive_url: "http://localhost:8005/".to_string(),
            log_dir: PathBuf::from("."),
            log_timezone: chrono_tz::Europe::Vienna,
            mathbin_url: "http://mathbin.net/".to_string(),
            fetch_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional; unset ones keep their default.
    ///
    /// # Errors
    /// Returns error if a numeric value or the timezone cannot be parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(server) = env::var("IRC_SERVER") {
            config.server = server;
        }
        if let Ok(nick) = env::var("IRC_NICK") {
            config.nick = nick;
        }
        config.password = env::var("IRC_PASSWORD").ok().filter(|p| !p.is_empty());

        if let Ok(channels) = env::var("IRC_CHANNELS") {
            config.channels = parse_channels(&channels);
        }

        if let Ok(attempts) = env::var("MAX_CONNECT_ATTEMPTS") {
            config.max_connect_attempts = attempts
                .trim()
                .parse()
                .context("MAX_CONNECT_ATTEMPTS must be a positive integer")?;
        }
        if let Ok(secs) = env::var("RECONNECT_DELAY_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .context("RECONNECT_DELAY_SECS must be an integer")?;
            config.reconnect_delay = Duration::from_secs(secs);
        }

        if let Ok(listen) = env::var("HTTP_LISTEN") {
            config.http_listen = normalize_listen_addr(&listen);
        }
        if let Ok(url) = env::var("ARCHIVE_URL") {
            config.archive_url = url;
        }

        if let Ok(dir) = env::var("LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        if let Ok(tz) = env::var("LOG_TIMEZONE") {
            config.log_timezone = tz
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("unknown timezone: {tz}"))?;
        }

        if let Ok(url) = env::var("MATHBIN_URL") {
            config.mathbin_url = url;
        }
        if let Ok(secs) = env::var("FETCH_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .context("FETCH_TIMEOUT_SECS must be an integer")?;
            config.fetch_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

/// Parse a comma-separated channel list, dropping blanks.
pub fn parse_channels(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Turn a bare `:port` into an address binding all interfaces.
pub fn normalize_listen_addr(input: &str) -> String {
    let input = input.trim();
    match input.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{}", port),
        None => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_channels() {
        assert_eq!(parse_channels("#tm, #rust,,"), vec!["#tm", "#rust"]);
        assert!(parse_channels(" , ").is_empty());
    }

    #[test]
    fn test_normalize_listen_addr() {
        assert_eq!(normalize_listen_addr(":8005"), "0.0.0.0:8005");
        assert_eq!(normalize_listen_addr("127.0.0.1:9000"), "127.0.0.1:9000");
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.max_connect_attempts, 5);
        assert_eq!(config.reconnect_delay, Duration::from_secs(5));
        assert_eq!(config.log_timezone, chrono_tz::Europe::Vienna);
    }
}
