//! Runner configuration.
//!
//! The target URL and readiness wait are supplied from outside (YAML file,
//! CLI flags, environment) rather than baked into scenarios.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::browser::BrowserConfig;
use crate::result::{VerifyError, VerifyResult};
use crate::wait::{WaitOptions, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS};

/// Default application URL (Vite dev server)
pub const DEFAULT_BASE_URL: &str = "http://localhost:5173";

/// Default navigation timeout (30 seconds)
pub const DEFAULT_NAVIGATION_TIMEOUT_MS: u64 = 30_000;

/// Default bound for fill, click, screenshot, and session close (10 seconds)
pub const DEFAULT_ACTION_TIMEOUT_MS: u64 = 10_000;

/// Default readiness wait (30 seconds)
pub const DEFAULT_READY_TIMEOUT_MS: u64 = 30_000;

/// Configuration for a scenario run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Base URL of the application under test
    pub base_url: String,
    /// Directory that relative screenshot paths are written under
    pub output_dir: PathBuf,
    /// Bound for each `assert_visible` step
    pub assert_timeout_ms: u64,
    /// Interval between visibility checks
    pub poll_interval_ms: u64,
    /// Bound for each navigation
    pub navigation_timeout_ms: u64,
    /// Bound for each fill, click, screenshot, and the final session close
    pub action_timeout_ms: u64,
    /// How long to wait for the base URL to answer before the first step (0 = skip)
    pub ready_timeout_ms: u64,
    /// Browser launch options
    pub browser: BrowserConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from("."),
            assert_timeout_ms: DEFAULT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            navigation_timeout_ms: DEFAULT_NAVIGATION_TIMEOUT_MS,
            action_timeout_ms: DEFAULT_ACTION_TIMEOUT_MS,
            ready_timeout_ms: DEFAULT_READY_TIMEOUT_MS,
            browser: BrowserConfig::default(),
        }
    }
}

impl RunnerConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the screenshot output directory
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the assertion timeout
    #[must_use]
    pub const fn with_assert_timeout(mut self, ms: u64) -> Self {
        self.assert_timeout_ms = ms;
        self
    }

    /// Set the polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, ms: u64) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    /// Set the navigation timeout
    #[must_use]
    pub const fn with_navigation_timeout(mut self, ms: u64) -> Self {
        self.navigation_timeout_ms = ms;
        self
    }

    /// Set the bound for fill, click, screenshot, and close
    #[must_use]
    pub const fn with_action_timeout(mut self, ms: u64) -> Self {
        self.action_timeout_ms = ms;
        self
    }

    /// Set the readiness wait
    #[must_use]
    pub const fn with_ready_timeout(mut self, ms: u64) -> Self {
        self.ready_timeout_ms = ms;
        self
    }

    /// Set browser options
    #[must_use]
    pub fn with_browser(mut self, browser: BrowserConfig) -> Self {
        self.browser = browser;
        self
    }

    /// Wait options for visibility assertions
    #[must_use]
    pub const fn assert_wait(&self) -> WaitOptions {
        WaitOptions {
            timeout_ms: self.assert_timeout_ms,
            poll_interval_ms: self.poll_interval_ms,
        }
    }

    /// Navigation timeout as Duration
    #[must_use]
    pub const fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    /// Action timeout as Duration
    #[must_use]
    pub const fn action_timeout(&self) -> Duration {
        Duration::from_millis(self.action_timeout_ms)
    }

    /// Outer bound for a whole `assert_visible` step: its own timeout plus
    /// one poll interval for the final check.
    #[must_use]
    pub const fn assert_bound(options: &WaitOptions) -> Duration {
        Duration::from_millis(options.timeout_ms.saturating_add(options.poll_interval_ms))
    }

    /// Resolve a step URL against the base URL.
    ///
    /// Absolute URLs (`scheme:`) pass through; anything else is joined to the
    /// base with exactly one `/` between them.
    #[must_use]
    pub fn resolve_url(&self, url: &str) -> String {
        if has_scheme(url) {
            return url.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        let path = url.trim_start_matches('/');
        if path.is_empty() {
            format!("{base}/")
        } else {
            format!("{base}/{path}")
        }
    }

    /// Resolve a screenshot path against the output directory
    #[must_use]
    pub fn resolve_output(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.output_dir.join(path)
        }
    }

    /// Load configuration from a YAML file; missing keys take defaults
    pub fn from_file(path: impl AsRef<Path>) -> VerifyResult<Self> {
        let yaml = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_yaml_ng::from_str(&yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the base URL scheme and that step bounds are non-zero
    pub fn validate(&self) -> VerifyResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(VerifyError::scenario(format!(
                "base_url must be http(s), got {:?}",
                self.base_url
            )));
        }
        if self.assert_timeout_ms == 0 {
            return Err(VerifyError::scenario("assert_timeout_ms must be positive"));
        }
        if self.navigation_timeout_ms == 0 {
            return Err(VerifyError::scenario("navigation_timeout_ms must be positive"));
        }
        if self.action_timeout_ms == 0 {
            return Err(VerifyError::scenario("action_timeout_ms must be positive"));
        }
        Ok(())
    }
}

fn has_scheme(url: &str) -> bool {
    url.split_once(':').is_some_and(|(scheme, _)| {
        !scheme.is_empty()
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
            && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
    })
}
