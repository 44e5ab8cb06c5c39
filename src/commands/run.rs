//! Run command - execute one binary and forward its behavior

use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::HarnessConfig;
use crate::runner::{self, ExecutionRequest};

/// Execute the run command
///
/// Prints the child's stdout and stderr to ours unchanged and returns its
/// exit code for the process to exit with.
pub fn execute(
    config: &HarnessConfig,
    binary: PathBuf,
    args: Vec<String>,
    timeout_secs: Option<u64>,
    no_chmod: bool,
) -> Result<i32> {
    let timeout = timeout_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.timeout());

    let request = ExecutionRequest::new(binary)
        .args(args)
        .timeout(timeout)
        .ensure_executable(config.ensure_executable && !no_chmod);

    let result = runner::execute(&request)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(result.stdout.as_bytes())
        .and_then(|()| stdout.flush())
        .context("Failed to forward stdout")?;

    if !result.stderr.is_empty() {
        let mut stderr = std::io::stderr().lock();
        stderr
            .write_all(result.stderr.as_bytes())
            .and_then(|()| stderr.flush())
            .context("Failed to forward stderr")?;
    }

    Ok(result.exit_code)
}
