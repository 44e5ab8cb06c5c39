//! Result type for a completed invocation

use std::path::PathBuf;
use std::time::Duration;

/// Captured behavior of a process that ran to completion
///
/// Only produced when the child exited on its own (any exit code, including
/// death by signal) within the timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub executable: PathBuf,
    pub stdout: String,
    pub stderr: String,
    /// Exit status as reported by the OS; `-N` when killed by signal `N`
    pub exit_code: i32,
    pub duration: Duration,
}

impl ExecutionResult {
    pub fn new(
        executable: PathBuf,
        stdout: String,
        stderr: String,
        exit_code: i32,
        duration: Duration,
    ) -> Self {
        Self {
            executable,
            stdout,
            stderr,
            exit_code,
            duration,
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Signal number that terminated the child, if any
    pub fn signal(&self) -> Option<i32> {
        (self.exit_code < 0).then_some(-self.exit_code)
    }

    /// One-line summary for logs and reports
    pub fn summary(&self) -> String {
        let status = match self.signal() {
            Some(sig) => format!("killed by signal {sig}"),
            None => format!("exit code {}", self.exit_code),
        };
        format!(
            "{} ({}, {}ms, {} bytes stdout, {} bytes stderr)",
            self.executable.display(),
            status,
            self.duration.as_millis(),
            self.stdout.len(),
            self.stderr.len()
        )
    }
}
