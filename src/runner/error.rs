//! Failure taxonomy for a single runner invocation

use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Why an invocation did not produce an [`ExecutionResult`](super::ExecutionResult)
///
/// `NotFound`, `InvalidTarget` and `Timeout` are the contract failures callers
/// are expected to match on. The remaining variants report faults in the
/// environment (permissions refused, exec failure, broken wait) and always
/// carry the underlying OS error.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Binary not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Not a file: {}", path.display())]
    InvalidTarget { path: PathBuf },

    #[error("Binary execution timed out after {}ms: {}", timeout.as_millis(), path.display())]
    Timeout { path: PathBuf, timeout: Duration },

    #[error("Failed to make {} executable", path.display())]
    Permissions {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to spawn {}", path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error while running {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RunError {
    /// Path of the executable the failure refers to
    pub fn path(&self) -> &PathBuf {
        match self {
            RunError::NotFound { path }
            | RunError::InvalidTarget { path }
            | RunError::Timeout { path, .. }
            | RunError::Permissions { path, .. }
            | RunError::Spawn { path, .. }
            | RunError::Io { path, .. } => path,
        }
    }

    /// Short label used in reports
    pub fn kind(&self) -> &'static str {
        match self {
            RunError::NotFound { .. } => "not-found",
            RunError::InvalidTarget { .. } => "invalid-target",
            RunError::Timeout { .. } => "timeout",
            RunError::Permissions { .. } => "permissions",
            RunError::Spawn { .. } => "spawn",
            RunError::Io { .. } => "io",
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, RunError::Timeout { .. })
    }
}
