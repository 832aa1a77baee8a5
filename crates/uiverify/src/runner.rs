//! Sequential scenario execution.
//!
//! Steps run strictly in declared order, each awaited to completion before
//! the next begins. The first failing step aborts the scenario; nothing is
//! retried except the bounded polling inside `assert_visible`.
//!
//! Every session call is bounded: navigation by `navigation_timeout_ms`,
//! visibility checks by the assertion deadline, and fill, click, screenshot,
//! and close by `action_timeout_ms`.

use std::future::Future;
use std::path::PathBuf;
use std::time::Instant;

use tracing::Instrument;

use crate::config::RunnerConfig;
use crate::locator::Locator;
use crate::readiness::wait_until_ready;
use crate::report::{ScenarioReport, StepReport};
use crate::result::{VerifyError, VerifyResult};
use crate::scenario::Scenario;
use crate::session::Session;
use crate::step::{Step, Vars};
use crate::wait::WaitOptions;

/// Executes scenarios against a session
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    config: RunnerConfig,
}

impl ScenarioRunner {
    /// Create a runner
    #[must_use]
    pub const fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    #[must_use]
    pub const fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Wait for the target, launch a browser session, and run `scenario`.
    pub async fn run_in_browser(&self, scenario: &Scenario) -> VerifyResult<ScenarioReport> {
        scenario.validate()?;
        let ready = WaitOptions::new()
            .with_timeout(self.config.ready_timeout_ms)
            .with_poll_interval(self.config.poll_interval_ms);
        wait_until_ready(&self.config.base_url, ready).await?;
        let session = crate::browser::open_session(&self.config.browser).await?;
        self.run(scenario, session).await
    }

    /// Run `scenario` in `session`, closing the session on every exit path.
    ///
    /// Variables are generated once per call, so repeated runs of the same
    /// scenario get fresh random identifiers.
    pub async fn run<S: Session>(
        &self,
        scenario: &Scenario,
        mut session: S,
    ) -> VerifyResult<ScenarioReport> {
        let started = Instant::now();
        let vars = scenario.resolve_vars();
        let span = tracing::info_span!("scenario", name = %scenario.name);

        async {
            tracing::info!(steps = scenario.len(), "scenario started");
            let outcome = self.execute(scenario, &vars, &mut session).await;
            let last_url = session.current_url().to_string();

            let bound = self.config.action_timeout();
            match tokio::time::timeout(bound, session.close()).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::warn!(error = %e, "session close failed"),
                Err(_) => tracing::warn!(
                    timeout_ms = bound.as_millis() as u64,
                    "session close did not finish"
                ),
            }

            match outcome {
                Ok(steps) => {
                    let report = ScenarioReport {
                        name: scenario.name.clone(),
                        steps,
                        duration: started.elapsed(),
                    };
                    tracing::info!(
                        elapsed_ms = report.duration.as_millis() as u64,
                        "scenario passed"
                    );
                    Ok(report)
                }
                Err(e) => {
                    tracing::error!(error = %e, url = %last_url, "scenario failed");
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Execute every step in order against an already-open session.
    ///
    /// The caller keeps ownership of the session and is responsible for
    /// closing it. Errors are wrapped in `VerifyError::StepFailed`.
    pub async fn execute<S: Session + ?Sized>(
        &self,
        scenario: &Scenario,
        vars: &Vars,
        session: &mut S,
    ) -> VerifyResult<Vec<StepReport>> {
        let mut reports = Vec::with_capacity(scenario.len());

        for (i, declared) in scenario.step_list().iter().enumerate() {
            let index = i + 1;
            let fail = |step: &Step, source: VerifyError| VerifyError::StepFailed {
                index,
                step: step.to_string(),
                source: Box::new(source),
            };

            let step = declared.resolve(vars).map_err(|e| fail(declared, e))?;
            let started = Instant::now();
            let artifact = self
                .execute_step(&step, session)
                .await
                .map_err(|e| fail(&step, e))?;
            let duration = started.elapsed();

            tracing::info!(
                index,
                kind = step.kind(),
                elapsed_ms = duration.as_millis() as u64,
                "{step}"
            );
            reports.push(StepReport {
                index,
                description: step.to_string(),
                duration,
                artifact,
            });
        }

        Ok(reports)
    }

    async fn execute_step<S: Session + ?Sized>(
        &self,
        step: &Step,
        session: &mut S,
    ) -> VerifyResult<Option<PathBuf>> {
        match step {
            Step::Navigate { url } => {
                let url = self.config.resolve_url(url);
                let bound = self.config.navigation_timeout();
                tokio::time::timeout(bound, session.navigate(&url))
                    .await
                    .map_err(|_| VerifyError::Navigation {
                        url: url.clone(),
                        message: format!("no response within {}ms", bound.as_millis()),
                    })??;
                Ok(None)
            }
            Step::Fill { label, value } => {
                let target = Locator::label(label);
                self.bounded(session.fill(&target, value), |_| unresolved(&target))
                    .await?;
                Ok(None)
            }
            Step::Click { role, name } => {
                let target = Locator::role(role, name);
                self.bounded(session.click(&target), |_| unresolved(&target))
                    .await?;
                Ok(None)
            }
            Step::AssertVisible { text, timeout_ms } => {
                let mut options = self.config.assert_wait();
                if let Some(ms) = timeout_ms {
                    options.timeout_ms = *ms;
                }
                let bound = RunnerConfig::assert_bound(&options);
                tokio::time::timeout(bound, self.assert_visible(session, text, options))
                    .await
                    .map_err(|_| VerifyError::AssertionTimeout {
                        text: text.clone(),
                        timeout_ms: options.timeout_ms,
                    })??;
                Ok(None)
            }
            Step::Screenshot { path, region } => {
                let png = self
                    .bounded(session.screenshot(region.as_ref()), |ms| VerifyError::Screenshot {
                        message: format!("capture did not complete within {ms}ms"),
                    })
                    .await?;
                let path = self.config.resolve_output(path);
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(&path, &png).await?;
                tracing::debug!(path = %path.display(), bytes = png.len(), "screenshot written");
                Ok(Some(path))
            }
        }
    }

    async fn assert_visible<S: Session + ?Sized>(
        &self,
        session: &mut S,
        text: &str,
        options: WaitOptions,
    ) -> VerifyResult<()> {
        let mut poller = options.start();
        while poller.next_attempt().await {
            // a check may run past the deadline by at most one interval
            let budget = poller.remaining().max(options.poll_interval());
            match tokio::time::timeout(budget, session.is_text_visible(text)).await {
                Ok(visible) => {
                    if visible? {
                        tracing::debug!(text, attempts = poller.attempts(), "text visible");
                        return Ok(());
                    }
                }
                Err(_) => {
                    tracing::debug!(text, attempts = poller.attempts(), "visibility check stalled");
                }
            }
        }
        Err(VerifyError::AssertionTimeout {
            text: text.to_string(),
            timeout_ms: options.timeout_ms,
        })
    }

    /// Await a session action within `action_timeout_ms`.
    async fn bounded<T>(
        &self,
        action: impl Future<Output = VerifyResult<T>>,
        expired: impl FnOnce(u128) -> VerifyError,
    ) -> VerifyResult<T> {
        let bound = self.config.action_timeout();
        match tokio::time::timeout(bound, action).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(timeout_ms = bound.as_millis() as u64, "session action timed out");
                Err(expired(bound.as_millis()))
            }
        }
    }
}

/// A control that never resolved within the action bound counts as missing
fn unresolved(target: &Locator) -> VerifyError {
    VerifyError::ElementNotFound {
        query: target.to_string(),
        matches: 0,
    }
}

/// Run `scenario` in a fresh browser session configured by `config`.
pub async fn run_scenario(
    scenario: &Scenario,
    config: &RunnerConfig,
) -> VerifyResult<ScenarioReport> {
    ScenarioRunner::new(config.clone())
        .run_in_browser(scenario)
        .await
}
