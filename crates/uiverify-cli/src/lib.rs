//! uiverify CLI library
//!
//! Command definitions, configuration layering and console reporting for
//! the `uiverify` binary.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod commands;
mod config;
mod error;
pub mod logging;
mod output;
mod runner;

pub use commands::{Cli, ColorArg, Commands, RunArgs, ValidateArgs};
pub use config::{runner_config, CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::ProgressReporter;
pub use runner::{load_scenario, select_scenarios, ScenarioOutcome, SuiteResults, SuiteRunner};
