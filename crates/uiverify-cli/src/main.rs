//! uiverify: run UI verification scenarios
//!
//! ## Usage
//!
//! ```bash
//! uiverify list                             # Show built-in scenarios
//! uiverify run                              # Run every built-in scenario
//! uiverify run new-ui --base-url http://localhost:3000
//! uiverify run --file checkout.yaml         # Run a scenario file
//! uiverify validate checkout.yaml           # Check files without running
//! ```

use clap::Parser;
use std::process::ExitCode;
use uiverify::{builtin, ScenarioRunner};
use uiverify_cli::{
    load_scenario, logging, runner_config, select_scenarios, Cli, CliConfig, CliError, CliResult,
    ColorChoice, Commands, ProgressReporter, RunArgs, SuiteRunner, ValidateArgs, Verbosity,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    logging::init(config.verbosity, config.color.should_color());

    match cli.command {
        Commands::Run(args) => run_scenarios(&config, &args),
        Commands::List => {
            list_scenarios(&config);
            Ok(())
        }
        Commands::Validate(args) => validate_files(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let color: ColorChoice = cli.color.clone().into();
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(color)
}

fn reporter(config: &CliConfig) -> ProgressReporter {
    ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet())
}

fn run_scenarios(config: &CliConfig, args: &RunArgs) -> CliResult<()> {
    let runner_config = runner_config(args)?;
    let scenarios = select_scenarios(args)?;
    tracing::debug!(
        base_url = %runner_config.base_url,
        count = scenarios.len(),
        "running scenarios"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let suite = SuiteRunner::new(ScenarioRunner::new(runner_config), config, args.fail_fast);
    let results = runtime.block_on(suite.run(&scenarios))?;
    results.into_result()
}

fn list_scenarios(config: &CliConfig) {
    let reporter = ProgressReporter::new(config.color.should_color(), false);
    for scenario in builtin::all() {
        reporter.entry(&scenario.name, &scenario.description);
    }
}

fn validate_files(config: &CliConfig, args: &ValidateArgs) -> CliResult<()> {
    let reporter = reporter(config);
    let mut invalid = 0;
    for path in &args.files {
        match load_scenario(path) {
            Ok(scenario) => reporter.success(&format!(
                "{}: {} ({} steps)",
                path.display(),
                scenario.name,
                scenario.len()
            )),
            Err(e) => {
                invalid += 1;
                reporter.failure(&e.to_string());
            }
        }
    }
    if invalid > 0 {
        return Err(CliError::InvalidFiles { invalid });
    }
    Ok(())
}
