//! Kantoku webhook probe entry point.
//!
//! Binary name: `kantoku-probe`
//!
//! Sends one task generation request to the n8n workflow webhook, prints the
//! outcome, and exits 0 when the workflow answered 200 with JSON, 1 otherwise.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use kantoku_observe::tracing_setup::{LogFormat, default_filter, init_tracing};

// One request, nothing else in flight: a single-threaded runtime suffices.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "kantoku-probe", &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    let log_format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    if let Err(e) = init_tracing(default_filter(cli.verbose, cli.quiet), log_format) {
        eprintln!("Warning: failed to initialize logging: {e}");
    }

    let config = cli.probe_config();
    tracing::debug!(?config, "Resolved probe configuration");

    match cli::probe::execute(&config, cli.json).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("Probe setup failed: {e:#}");
            cli::probe::report_setup_failure(&config, &e, cli.json);
            ExitCode::FAILURE
        }
    }
}
