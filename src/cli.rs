//! Command-line interface for the smoke harness

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::*;

use crate::client::Cluster;
use crate::harness::{self, RunOptions};
use crate::smoke;

#[derive(Parser)]
#[command(name = "treeline-smoke")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Smoke-test harness for a Treeline analytics cluster", long_about = None)]
pub struct Cli {
    /// Cluster host
    #[arg(long, default_value = "127.0.0.1", env = "TREELINE_HOST")]
    pub host: String,

    /// Cluster port
    #[arg(long, default_value_t = 54321, env = "TREELINE_PORT")]
    pub port: u16,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the big-categorical forest smoke test
    Run {
        /// Dataset file; defaults to data/bigcat_5000x2.csv located by
        /// walking up from the working directory
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
    /// Check cluster health and print the server version
    Status,
}

pub fn cmd_run(opts: &RunOptions, data: Option<&Path>) -> anyhow::Result<()> {
    let data = match data {
        Some(path) => path.to_path_buf(),
        None => harness::locate(smoke::BIGCAT_DATA)?,
    };

    harness::run("bigcat_forest", opts, |cluster| {
        smoke::bigcat_forest(cluster, &data)
    })?;
    Ok(())
}

pub fn cmd_status(opts: &RunOptions) -> anyhow::Result<()> {
    let cluster = Cluster::connect(&opts.host, opts.port)?;
    let health = cluster.health()?;

    println!("{} {}", "Cluster".bold(), cluster.base_url());
    println!("{:<10} {}", "Status", health.status.green());
    println!("{:<10} {}", "Version", health.version);
    Ok(())
}
