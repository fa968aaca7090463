//! lnpulse CLI entry point

use anyhow::Result;
use lnpulse::config::{cli::Cli, RunConfig};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    // Parse CLI arguments
    let cli = Cli::parse_args();
    init_logging(cli.debug);
    cli.validate()?;

    let program = std::env::args().next().unwrap_or_else(|| "lnpulse".to_string());
    let config = RunConfig::from_cli(program, &cli);
    log::debug!(
        "estimating with {} workers, {} output, args {:?}",
        config.workers,
        config.format,
        config.args
    );

    let outcome = lnpulse::run(&config, std::io::stdout())?;
    Ok(outcome.status().exit_code())
}

/// Install the stderr logger; `--debug` lowers the default filter, RUST_LOG wins
fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}
