//! Smoke-test harness entry point
//!
//! Connects to a running Treeline cluster and drives the smoke test against
//! it. Any error propagates to a non-zero exit status.

use clap::Parser;

use treeline_client::cli::{cmd_run, cmd_status, Cli, Commands};
use treeline_client::harness::RunOptions;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "treeline_client=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let opts = RunOptions {
        host: cli.host,
        port: cli.port,
    };

    match cli.command {
        Some(Commands::Run { data }) => cmd_run(&opts, data.as_deref())?,
        Some(Commands::Status) => cmd_status(&opts)?,
        None => cmd_run(&opts, None)?,
    }

    Ok(())
}
