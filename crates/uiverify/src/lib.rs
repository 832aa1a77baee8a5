//! uiverify: sequential UI verification scenarios.
//!
//! A [`Scenario`] is an ordered list of [`Step`]s (navigate, fill, click,
//! assert visible text, screenshot). A [`ScenarioRunner`] executes the steps
//! against one [`Session`], stopping at the first failure and closing the
//! session on every exit path.
//!
//! ```no_run
//! use uiverify::{builtin, RunnerConfig, ScenarioRunner};
//!
//! # async fn demo() -> uiverify::VerifyResult<()> {
//! let runner = ScenarioRunner::new(RunnerConfig::new().with_base_url("http://localhost:5173"));
//! let report = runner.run_in_browser(&builtin::new_ui()).await?;
//! println!("{} steps in {:?}", report.step_count(), report.duration);
//! # Ok(())
//! # }
//! ```
//!
//! The Chrome `DevTools` Protocol backend is behind the `browser` feature.

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

pub mod builtin;
mod browser;
mod config;
mod locator;
mod readiness;
mod report;
mod result;
mod runner;
mod scenario;
mod session;
mod step;
pub mod testdata;
mod wait;

#[cfg(feature = "browser")]
pub use browser::CdpSession;
pub use browser::{open_session, BrowserConfig};
pub use config::{
    RunnerConfig, DEFAULT_ACTION_TIMEOUT_MS, DEFAULT_BASE_URL, DEFAULT_NAVIGATION_TIMEOUT_MS,
    DEFAULT_READY_TIMEOUT_MS,
};
pub use locator::{visible_text_script, BoundingBox, Locator, Selector};
pub use readiness::wait_until_ready;
pub use report::{ScenarioReport, StepReport};
pub use result::{VerifyError, VerifyResult};
pub use runner::{run_scenario, ScenarioRunner};
pub use scenario::{Scenario, Variable, SCENARIO_VERSION};
pub use session::Session;
pub use step::{interpolate, placeholders, Step, Vars};
pub use wait::{Poller, WaitOptions, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS};

/// Commonly used types
pub mod prelude {
    pub use super::builtin;
    pub use super::{
        Locator, RunnerConfig, Scenario, ScenarioReport, ScenarioRunner, Session, Step,
        VerifyError, VerifyResult,
    };
}
