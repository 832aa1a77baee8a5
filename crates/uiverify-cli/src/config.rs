//! CLI configuration

use serde::{Deserialize, Serialize};
use uiverify::RunnerConfig;

use crate::commands::RunArgs;
use crate::error::{CliError, CliResult};

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - failures only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - per-step detail
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Map `-q` and the `-v` count to a level
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::IsTerminal::is_terminal(&std::io::stdout()),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }
}

/// Build the runner configuration for `run`.
///
/// Starts from the `--config` file (or defaults) and applies command-line
/// overrides on top; the result is validated.
pub fn runner_config(args: &RunArgs) -> CliResult<RunnerConfig> {
    let mut config = match &args.config {
        Some(path) => RunnerConfig::from_file(path)?,
        None => RunnerConfig::default(),
    };

    if let Some(url) = &args.base_url {
        config.base_url.clone_from(url);
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir.clone_from(dir);
    }
    if let Some(ms) = args.timeout_ms {
        config.assert_timeout_ms = ms;
    }
    if let Some(ms) = args.navigation_timeout_ms {
        config = config.with_navigation_timeout(ms);
    }
    if let Some(ms) = args.action_timeout_ms {
        config = config.with_action_timeout(ms);
    }
    if let Some(ms) = args.ready_timeout_ms {
        config.ready_timeout_ms = ms;
    }
    if args.headed {
        config.browser.headless = false;
    }
    if args.no_sandbox {
        config.browser.sandbox = false;
    }
    if let Some(path) = &args.chromium_path {
        config.browser.chromium_path = Some(path.clone());
    }

    config
        .validate()
        .map_err(|e| CliError::config(e.to_string()))?;
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(false, 0), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(false, 1), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, 5), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(true, 2), Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_predicates() {
        assert!(Verbosity::Quiet.is_quiet());
        assert!(!Verbosity::Normal.is_quiet());
        assert!(Verbosity::Debug.is_verbose());
        assert!(!Verbosity::Normal.is_verbose());
    }

    #[test]
    fn test_should_color_fixed_choices() {
        assert!(ColorChoice::Always.should_color());
        assert!(!ColorChoice::Never.should_color());
    }

    #[test]
    fn test_cli_config_builders() {
        let config = CliConfig::new()
            .with_verbosity(Verbosity::Verbose)
            .with_color(ColorChoice::Never);
        assert_eq!(config.verbosity, Verbosity::Verbose);
        assert_eq!(config.color, ColorChoice::Never);
    }

    #[test]
    fn test_runner_config_defaults() {
        let config = runner_config(&RunArgs::default()).unwrap();
        assert_eq!(config, RunnerConfig::default());
    }

    #[test]
    fn test_runner_config_overrides() {
        let args = RunArgs {
            base_url: Some("http://127.0.0.1:3000".to_string()),
            output_dir: Some(PathBuf::from("shots")),
            timeout_ms: Some(1_000),
            navigation_timeout_ms: Some(15_000),
            action_timeout_ms: Some(3_000),
            ready_timeout_ms: Some(0),
            headed: true,
            no_sandbox: true,
            chromium_path: Some("/usr/bin/chromium".to_string()),
            ..RunArgs::default()
        };
        let config = runner_config(&args).unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:3000");
        assert_eq!(config.output_dir, PathBuf::from("shots"));
        assert_eq!(config.assert_timeout_ms, 1_000);
        assert_eq!(config.navigation_timeout_ms, 15_000);
        assert_eq!(config.action_timeout_ms, 3_000);
        assert_eq!(config.ready_timeout_ms, 0);
        assert!(!config.browser.headless);
        assert!(!config.browser.sandbox);
        assert_eq!(config.browser.chromium_path.as_deref(), Some("/usr/bin/chromium"));
    }

    #[test]
    fn test_zero_action_timeout_rejected() {
        let args = RunArgs {
            action_timeout_ms: Some(0),
            ..RunArgs::default()
        };
        assert!(runner_config(&args).is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uiverify.yaml");
        std::fs::write(
            &path,
            "base_url: http://from-file:8080\nassert_timeout_ms: 9000\n",
        )
        .unwrap();
        let args = RunArgs {
            config: Some(path),
            timeout_ms: Some(100),
            ..RunArgs::default()
        };
        let config = runner_config(&args).unwrap();
        assert_eq!(config.base_url, "http://from-file:8080");
        assert_eq!(config.assert_timeout_ms, 100);
    }

    #[test]
    fn test_sample_config_file_loads() {
        let args = RunArgs {
            config: Some(PathBuf::from(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/../../scenarios/uiverify.yaml"
            ))),
            ..RunArgs::default()
        };
        let config = runner_config(&args).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("screenshots"));
        assert!(config.browser.headless);
        assert_eq!(config.action_timeout_ms, 10_000);
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let args = RunArgs {
            base_url: Some("localhost:5173".to_string()),
            ..RunArgs::default()
        };
        assert!(matches!(
            runner_config(&args),
            Err(CliError::Config { .. })
        ));
    }
}
