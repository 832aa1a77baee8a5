//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// uiverify: run UI verification scenarios against a locally served web app
#[derive(Parser, Debug)]
#[command(name = "uiverify")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run scenarios in a headless browser
    Run(RunArgs),

    /// List built-in scenarios
    List,

    /// Parse and validate scenario files without running them
    Validate(ValidateArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug, Default)]
pub struct RunArgs {
    /// Built-in scenarios to run (all when omitted)
    pub scenarios: Vec<String>,

    /// Run scenarios from YAML files instead of the built-ins
    #[arg(short, long = "file", value_name = "FILE", conflicts_with = "scenarios")]
    pub files: Vec<PathBuf>,

    /// Runner configuration file (YAML)
    #[arg(long, env = "UIVERIFY_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Base URL of the application under test
    #[arg(long, env = "UIVERIFY_BASE_URL", value_name = "URL")]
    pub base_url: Option<String>,

    /// Directory screenshots are written to
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Timeout for each visibility assertion in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Timeout for each navigation in milliseconds
    #[arg(long, value_name = "MS")]
    pub navigation_timeout_ms: Option<u64>,

    /// Timeout for each fill, click, and screenshot in milliseconds
    #[arg(long, value_name = "MS")]
    pub action_timeout_ms: Option<u64>,

    /// How long to wait for the app to answer HTTP (0 disables the wait)
    #[arg(long, value_name = "MS")]
    pub ready_timeout_ms: Option<u64>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Disable the Chromium sandbox (needed in some containers)
    #[arg(long)]
    pub no_sandbox: bool,

    /// Chromium executable to launch
    #[arg(long, env = "CHROMIUM_PATH", value_name = "PATH")]
    pub chromium_path: Option<String>,

    /// Stop after the first failing scenario
    #[arg(long)]
    pub fail_fast: bool,
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Scenario files to validate
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

/// Color argument
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("uiverify").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_defaults() {
        let cli = parse(&["run"]);
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert!(args.scenarios.is_empty());
        assert!(args.files.is_empty());
        assert!(!args.headed);
        assert!(!args.fail_fast);
    }

    #[test]
    fn test_run_named_scenarios_and_options() {
        let cli = parse(&[
            "-vv",
            "run",
            "new-ui",
            "error-messages",
            "--base-url",
            "http://localhost:3000",
            "--timeout-ms",
            "2500",
            "--navigation-timeout-ms",
            "15000",
            "--action-timeout-ms",
            "3000",
            "--headed",
            "--no-sandbox",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.scenarios, vec!["new-ui", "error-messages"]);
        assert_eq!(args.base_url.as_deref(), Some("http://localhost:3000"));
        assert_eq!(args.timeout_ms, Some(2500));
        assert_eq!(args.navigation_timeout_ms, Some(15_000));
        assert_eq!(args.action_timeout_ms, Some(3_000));
        assert!(args.headed);
        assert!(args.no_sandbox);
    }

    #[test]
    fn test_files_conflict_with_names() {
        let result = Cli::try_parse_from(["uiverify", "run", "new-ui", "--file", "a.yaml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_requires_files() {
        assert!(Cli::try_parse_from(["uiverify", "validate"]).is_err());
        let cli = parse(&["validate", "a.yaml", "b.yaml"]);
        let Commands::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.files.len(), 2);
    }

    #[test]
    fn test_color_arg_conversion() {
        use crate::config::ColorChoice;
        assert_eq!(ColorChoice::from(ColorArg::Never), ColorChoice::Never);
        assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
        assert_eq!(ColorChoice::from(ColorArg::Auto), ColorChoice::Auto);
    }
}
