//! Live feeds: synthetic activity events and log lines.
//!
//! DESIGN
//! ======
//! Nothing here is streamed from a real cluster. The activity feed replaces
//! its whole snapshot on every tick, so the latest tick always wins. The log
//! viewer appends one line per tick into a bounded buffer and drops the
//! oldest line once full.

use std::collections::VecDeque;
use std::sync::Arc;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::services::audit::Severity;
use crate::services::ticker::PeriodicTask;
use crate::state::AppState;

/// Events per activity snapshot.
pub const ACTIVITY_SNAPSHOT_LEN: usize = 8;

const USERS: [&str; 4] = ["admin@jacon.io", "ops@acme.example", "ci-bot", "viewer@globex.example"];
const ACTIONS: [&str; 6] = ["deploy", "scale", "restart", "update", "delete", "read"];
const RESOURCES: [&str; 6] = [
    "workload/payments-api",
    "workload/ledger",
    "stack/storefront",
    "config/feature-flags",
    "endpoint/platform-gateway",
    "cluster/prod-eu-west",
];
const LOG_SOURCES: [&str; 4] = ["payments-api", "ledger", "storefront-web", "ingress-nginx"];
const LOG_MESSAGES: [&str; 6] = [
    "GET /healthz 200",
    "request completed",
    "connection pool saturated, queueing",
    "retrying upstream call",
    "cache miss for session lookup",
    "upstream timed out after 30s",
];

#[derive(Debug, Clone, Serialize)]
pub struct ActivityEvent {
    pub id: Uuid,
    pub timestamp: String,
    pub user: String,
    pub action: String,
    pub resource: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogLine {
    pub timestamp: String,
    pub level: LogLevel,
    pub source: String,
    pub message: String,
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default()
}

fn pick(items: &[&'static str], rng: &mut impl Rng) -> String {
    items.choose(rng).copied().unwrap_or_default().to_owned()
}

/// Generate `count` synthetic activity events.
#[must_use]
pub fn generate_activity(count: usize) -> Vec<ActivityEvent> {
    let mut rng = rand::rng();
    let timestamp = now_rfc3339();
    (0..count)
        .map(|_| {
            let severity = match rng.random_range(0..10) {
                0 => Severity::Error,
                1 | 2 => Severity::Warning,
                _ => Severity::Info,
            };
            ActivityEvent {
                id: Uuid::new_v4(),
                timestamp: timestamp.clone(),
                user: pick(&USERS, &mut rng),
                action: pick(&ACTIONS, &mut rng),
                resource: pick(&RESOURCES, &mut rng),
                severity,
            }
        })
        .collect()
}

/// Generate one synthetic log line. A `None` source picks one at random.
#[must_use]
pub fn synthetic_log_line(source: Option<&str>) -> LogLine {
    let mut rng = rand::rng();
    let level = match rng.random_range(0..20) {
        0 => LogLevel::Error,
        1..=3 => LogLevel::Warn,
        4..=6 => LogLevel::Debug,
        _ => LogLevel::Info,
    };
    LogLine {
        timestamp: now_rfc3339(),
        level,
        source: source.map_or_else(|| pick(&LOG_SOURCES, &mut rng), str::to_owned),
        message: pick(&LOG_MESSAGES, &mut rng),
    }
}

// =============================================================================
// ACTIVITY FEED
// =============================================================================

pub struct ActivityFeed {
    events: RwLock<Vec<ActivityEvent>>,
}

impl ActivityFeed {
    /// Seeded with one snapshot so readers never see an empty feed before the first tick.
    #[must_use]
    pub fn new() -> Self {
        Self { events: RwLock::new(generate_activity(ACTIVITY_SNAPSHOT_LEN)) }
    }

    /// Replace the snapshot wholesale.
    pub async fn replace(&self, events: Vec<ActivityEvent>) {
        *self.events.write().await = events;
    }

    pub async fn refresh(&self) {
        self.replace(generate_activity(ACTIVITY_SNAPSHOT_LEN)).await;
    }

    pub async fn snapshot(&self) -> Vec<ActivityEvent> {
        self.events.read().await.clone()
    }
}

impl Default for ActivityFeed {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// LOG BUFFER
// =============================================================================

pub struct LogBuffer {
    capacity: usize,
    lines: RwLock<VecDeque<LogLine>>,
}

impl LogBuffer {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { capacity, lines: RwLock::new(VecDeque::with_capacity(capacity)) }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub async fn push(&self, line: LogLine) {
        let mut lines = self.lines.write().await;
        while lines.len() >= self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    /// Up to `limit` most recent lines, oldest first, optionally for one source.
    pub async fn tail(&self, source: Option<&str>, limit: usize) -> Vec<LogLine> {
        let lines = self.lines.read().await;
        let mut out: Vec<LogLine> = lines
            .iter()
            .rev()
            .filter(|l| source.is_none_or(|s| l.source == s))
            .take(limit)
            .cloned()
            .collect();
        out.reverse();
        out
    }
}

// =============================================================================
// TASKS
// =============================================================================

/// Start the activity and log tickers. Dropping the returned handles stops them.
pub fn spawn_live_feeds(state: &AppState) -> Vec<PeriodicTask> {
    let period = state.config.poll_interval;

    let activity = Arc::clone(&state.activity);
    let activity_task = PeriodicTask::spawn("activity-feed", period, move || {
        let activity = Arc::clone(&activity);
        async move { activity.refresh().await }
    });

    let logs = Arc::clone(&state.logs);
    let log_task = PeriodicTask::spawn("log-viewer", period, move || {
        let logs = Arc::clone(&logs);
        async move { logs.push(synthetic_log_line(None)).await }
    });

    vec![activity_task, log_task]
}

#[cfg(test)]
#[path = "feeds_test.rs"]
mod tests;
