//! Smoke-test runner and dataset locator

use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

use colored::*;
use tracing::info;

use crate::client::Cluster;
use crate::error::{Result, TreelineError};

/// Connection options for a harness run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub host: String,
    pub port: u16,
}

/// Resolve a dataset path by walking up from the current directory, so the
/// harness can run from any subdirectory of a checkout.
pub fn locate(relative: &str) -> Result<PathBuf> {
    let cwd = env::current_dir()?;
    locate_from(&cwd, relative)
}

fn locate_from(start: &Path, relative: &str) -> Result<PathBuf> {
    for dir in start.ancestors() {
        let candidate = dir.join(relative);
        if candidate.exists() {
            return Ok(candidate);
        }
    }
    Err(TreelineError::DataNotFound(relative.to_string()))
}

/// Connect to the cluster, run a test body, and report PASS/FAIL with the
/// elapsed time. The body's error propagates unmodified.
pub fn run<F>(name: &str, opts: &RunOptions, test: F) -> Result<()>
where
    F: FnOnce(&Cluster) -> Result<()>,
{
    println!("{} {}", "Running".bold(), name);
    let cluster = Cluster::connect(&opts.host, opts.port)?;
    info!(test = %name, server_version = %cluster.version(), "Starting test");

    let start = Instant::now();
    match test(&cluster) {
        Ok(()) => {
            println!("{} {} ({:.2?})", "PASS".green().bold(), name, start.elapsed());
            Ok(())
        }
        Err(e) => {
            println!("{} {}: {}", "FAIL".red().bold(), name, e);
            Err(e)
        }
    }
}
