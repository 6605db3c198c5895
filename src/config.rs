//! Console configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! Every knob has a compiled-in default so the console starts with no
//! environment at all. Unparseable values fall back to the default rather
//! than aborting start-up.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SESSION_COOKIE: &str = "jacon_session";
pub const DEFAULT_MOCK_DELAY_MS: u64 = 500;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;
pub const DEFAULT_LOG_BUFFER: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// TCP port the HTTP listener binds to.
    pub port: u16,
    /// Name of the cookie whose presence the route guard checks.
    pub session_cookie: String,
    /// Whether the session cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
    /// JSON file backing the persisted session cache. `None` keeps it in memory.
    pub store_path: Option<PathBuf>,
    /// Artificial latency applied to mock login and policy calls.
    pub mock_delay: Duration,
    /// Tick period for the activity feed and log viewer.
    pub poll_interval: Duration,
    /// Maximum number of synthetic log lines retained.
    pub log_buffer: usize,
}

impl ConsoleConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `JACON_SESSION_COOKIE`: default `jacon_session`
    /// - `COOKIE_SECURE`: default false
    /// - `JACON_STORE_PATH`: in-memory cache when absent
    /// - `JACON_MOCK_DELAY_MS`: default 500
    /// - `JACON_POLL_INTERVAL_MS`: default 2000
    /// - `JACON_LOG_BUFFER`: default 200
    #[must_use]
    pub fn from_env() -> Self {
        let session_cookie = std::env::var("JACON_SESSION_COOKIE")
            .ok()
            .map(|raw| raw.trim().to_owned())
            .filter(|raw| !raw.is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_COOKIE.to_owned());

        Self {
            port: env_parse("PORT", DEFAULT_PORT),
            session_cookie,
            cookie_secure: env_bool("COOKIE_SECURE").unwrap_or(false),
            store_path: std::env::var("JACON_STORE_PATH")
                .ok()
                .filter(|raw| !raw.trim().is_empty())
                .map(PathBuf::from),
            mock_delay: Duration::from_millis(env_parse("JACON_MOCK_DELAY_MS", DEFAULT_MOCK_DELAY_MS)),
            poll_interval: Duration::from_millis(
                env_parse("JACON_POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS).max(1),
            ),
            log_buffer: env_parse("JACON_LOG_BUFFER", DEFAULT_LOG_BUFFER).max(1),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            session_cookie: DEFAULT_SESSION_COOKIE.to_owned(),
            cookie_secure: false,
            store_path: None,
            mock_delay: Duration::from_millis(DEFAULT_MOCK_DELAY_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            log_buffer: DEFAULT_LOG_BUFFER,
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
