//! Outcome records for executed scenarios.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// One executed step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// 1-based position in the scenario
    pub index: usize,
    /// Step description with placeholders resolved
    pub description: String,
    /// Wall time spent in the step
    pub duration: Duration,
    /// File written by a screenshot step
    pub artifact: Option<PathBuf>,
}

/// A scenario that ran to completion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Scenario name
    pub name: String,
    /// Steps in execution order
    pub steps: Vec<StepReport>,
    /// Total wall time, session setup and teardown included
    pub duration: Duration,
}

impl ScenarioReport {
    /// Create an empty report
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Number of executed steps
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Screenshot files written, in order
    pub fn artifacts(&self) -> impl Iterator<Item = &PathBuf> {
        self.steps.iter().filter_map(|s| s.artifact.as_ref())
    }

    /// Slowest step, if any
    #[must_use]
    pub fn slowest(&self) -> Option<&StepReport> {
        self.steps.iter().max_by_key(|s| s.duration)
    }
}
