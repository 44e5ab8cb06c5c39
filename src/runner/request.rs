//! Invocation requests

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default wall-clock bound for a single invocation (10 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything needed to run an executable once
///
/// Built fresh for each invocation and consumed by
/// [`execute`](super::execute). Arguments are handed to the child verbatim,
/// never through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    pub executable: PathBuf,
    pub args: Vec<String>,
    /// Bytes written to the child's stdin before it is closed; `None` gives
    /// the child a null stdin.
    pub stdin: Option<Vec<u8>>,
    /// Wall-clock bound; must be positive
    pub timeout: Duration,
    /// Directory the child starts in; inherits ours when unset
    pub working_dir: Option<PathBuf>,
    /// Add `0o755` to the artifact's mode before spawning
    pub ensure_executable: bool,
}

impl ExecutionRequest {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            args: Vec::new(),
            stdin: None,
            timeout: DEFAULT_TIMEOUT,
            working_dir: None,
            ensure_executable: true,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn stdin(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Set the wall-clock bound; `timeout` must be non-zero
    pub fn timeout(mut self, timeout: Duration) -> Self {
        debug_assert!(!timeout.is_zero(), "execution timeout must be positive");
        self.timeout = timeout;
        self
    }

    pub fn working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn ensure_executable(mut self, enabled: bool) -> Self {
        self.ensure_executable = enabled;
        self
    }
}
