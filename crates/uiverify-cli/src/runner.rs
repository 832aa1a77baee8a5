//! Suite execution: several scenarios, one after another

use std::future::Future;
use std::path::Path;
use std::time::{Duration, Instant};

use uiverify::{
    builtin, open_session, wait_until_ready, Scenario, ScenarioRunner, Session, VerifyError,
    VerifyResult, WaitOptions,
};

use crate::commands::RunArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::ProgressReporter;

/// Load and validate a scenario file
pub fn load_scenario(path: &Path) -> CliResult<Scenario> {
    Ok(Scenario::from_file(path)?)
}

/// Scenarios selected by `run`: files, named built-ins, or every built-in
pub fn select_scenarios(args: &RunArgs) -> CliResult<Vec<Scenario>> {
    if !args.files.is_empty() {
        return args.files.iter().map(|p| load_scenario(p)).collect();
    }
    if args.scenarios.is_empty() {
        return Ok(builtin::all());
    }
    args.scenarios
        .iter()
        .map(|name| builtin::find(name).ok_or_else(|| CliError::unknown_scenario(name)))
        .collect()
}

/// Outcome of one scenario
#[derive(Debug)]
pub struct ScenarioOutcome {
    /// Scenario name
    pub name: String,
    /// Steps completed successfully
    pub steps_passed: usize,
    /// Index of the slowest step of a passing run
    pub slowest_step: Option<usize>,
    /// Failure, if any
    pub error: Option<VerifyError>,
    /// Wall time including session setup
    pub duration: Duration,
}

impl ScenarioOutcome {
    /// Whether the scenario passed
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregated outcomes
#[derive(Debug, Default)]
pub struct SuiteResults {
    /// Outcomes in run order
    pub outcomes: Vec<ScenarioOutcome>,
    /// Total duration
    pub duration: Duration,
}

impl SuiteResults {
    /// Number of passed scenarios
    #[must_use]
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    /// Number of failed scenarios
    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    /// Convert to the process outcome
    pub fn into_result(self) -> CliResult<()> {
        match self.failed() {
            0 => Ok(()),
            failed => Err(CliError::ScenariosFailed {
                failed,
                total: self.outcomes.len(),
            }),
        }
    }
}

/// Runs a list of scenarios sequentially, each in its own session
#[derive(Debug)]
pub struct SuiteRunner {
    runner: ScenarioRunner,
    reporter: ProgressReporter,
    verbose: bool,
    fail_fast: bool,
}

impl SuiteRunner {
    /// Create a suite runner
    #[must_use]
    pub fn new(runner: ScenarioRunner, config: &CliConfig, fail_fast: bool) -> Self {
        let reporter =
            ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet());
        Self {
            runner,
            reporter,
            verbose: config.verbosity.is_verbose(),
            fail_fast,
        }
    }

    /// Wait for the target once, then run every scenario in a fresh browser.
    pub async fn run(&self, scenarios: &[Scenario]) -> CliResult<SuiteResults> {
        let config = self.runner.config();
        let ready = WaitOptions::new()
            .with_timeout(config.ready_timeout_ms)
            .with_poll_interval(config.poll_interval_ms);
        if config.ready_timeout_ms > 0 {
            self.reporter
                .info(&format!("Waiting for {} ...", config.base_url));
        }
        wait_until_ready(&config.base_url, ready).await?;

        let browser = &config.browser;
        Ok(self.run_with(scenarios, || open_session(browser)).await)
    }

    /// Run `scenarios`, opening each session with `open`.
    pub async fn run_with<S, F, Fut>(&self, scenarios: &[Scenario], mut open: F) -> SuiteResults
    where
        S: Session,
        F: FnMut() -> Fut,
        Fut: Future<Output = VerifyResult<S>>,
    {
        let started = Instant::now();
        let mut results = SuiteResults::default();
        self.reporter.header("Running scenarios");

        for scenario in scenarios {
            let scenario_started = Instant::now();
            let outcome = match open().await {
                Ok(session) => self.runner.run(scenario, session).await,
                Err(e) => Err(e),
            };

            let outcome = match outcome {
                Ok(report) => {
                    self.reporter.success(&format!(
                        "{} ({} steps, {:.2}s)",
                        report.name,
                        report.step_count(),
                        report.duration.as_secs_f64()
                    ));
                    for artifact in report.artifacts() {
                        self.reporter
                            .info(&format!("screenshot {}", artifact.display()));
                    }
                    let slowest = report.slowest();
                    if let Some(step) = slowest.filter(|_| self.verbose) {
                        self.reporter.info(&format!(
                            "slowest step {}: {} ({}ms)",
                            step.index,
                            step.description,
                            step.duration.as_millis()
                        ));
                    }
                    ScenarioOutcome {
                        slowest_step: slowest.map(|step| step.index),
                        name: report.name,
                        steps_passed: report.steps.len(),
                        error: None,
                        duration: scenario_started.elapsed(),
                    }
                }
                Err(e) => {
                    self.reporter.failure(&format!("{}: {e}", scenario.name));
                    ScenarioOutcome {
                        name: scenario.name.clone(),
                        steps_passed: e.step_index().map_or(0, |i| i - 1),
                        slowest_step: None,
                        error: Some(e),
                        duration: scenario_started.elapsed(),
                    }
                }
            };

            let stop = self.fail_fast && !outcome.passed();
            results.outcomes.push(outcome);
            if stop {
                break;
            }
        }

        results.duration = started.elapsed();
        self.reporter
            .summary(results.passed(), results.failed(), results.duration);
        results
    }
}
