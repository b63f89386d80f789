use std::process::ExitCode;

use clap::Parser;

mod cli;
mod progress;
mod run;

/// Exit status for usage errors, matching clap's own.
const USAGE_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    if let Err(error) = init_tracing(cli.quiet, cli.verbose) {
        eprintln!("docsig error: {error:#}");
        return ExitCode::from(USAGE_ERROR);
    }

    match run::run(&cli) {
        Ok(summary) => ExitCode::from(summary.exit_code()),
        Err(error) => {
            eprintln!("docsig error: {error:#}");
            ExitCode::from(USAGE_ERROR)
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("DOCSIG_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
