//! Bounded polling for eventually-visible UI state.
//!
//! Every wait has a deadline. The condition is always checked at least once,
//! even with a zero timeout, and then re-checked each poll interval until it
//! holds or the deadline passes.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;

/// Default assertion timeout (5 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Default polling interval (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Start a poller for these options
    #[must_use]
    pub fn start(&self) -> Poller {
        Poller {
            deadline: Instant::now() + self.timeout(),
            interval: self.poll_interval().max(Duration::from_millis(1)),
            attempts: 0,
        }
    }
}

/// Deadline tracker for one polling loop.
///
/// ```ignore
/// let mut poller = options.start();
/// while poller.next_attempt().await {
///     if check().await? { return Ok(()); }
/// }
/// Err(timeout)
/// ```
#[derive(Debug)]
pub struct Poller {
    deadline: Instant,
    interval: Duration,
    attempts: u32,
}

impl Poller {
    /// Wait for the next attempt slot; `false` once the deadline has passed.
    ///
    /// The first call returns `true` immediately. Later calls sleep one
    /// interval, never past the deadline, and a final attempt is granted
    /// exactly at the deadline.
    pub async fn next_attempt(&mut self) -> bool {
        if self.attempts == 0 {
            self.attempts = 1;
            return true;
        }
        let now = Instant::now();
        if now >= self.deadline {
            return false;
        }
        let wake = (now + self.interval).min(self.deadline);
        tokio::time::sleep_until(wake).await;
        self.attempts += 1;
        true
    }

    /// Time left before the deadline, zero once it has passed
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Number of attempts granted so far
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }
}
