//! Process Runner
//!
//! Runs one lab executable under controlled conditions and hands back what it
//! did: stdout, stderr and exit code.
//!
//! # Contract
//!
//! [`execute`] either returns a complete [`ExecutionResult`] or a
//! [`RunError`]; there is no partial-success mode.
//!
//! - **Preconditions**: the path must exist ([`RunError::NotFound`]) and be a
//!   regular file ([`RunError::InvalidTarget`]). Both are checked before any
//!   process is spawned.
//! - **Permissions**: unless the request opts out, the artifact's mode gains
//!   `0o755` first, since lab build steps do not always set it.
//! - **No shell**: arguments reach the child exactly as given.
//! - **Timeout**: default 10 seconds. On expiry the child's process group is
//!   killed with SIGKILL, the child is reaped and [`RunError::Timeout`] is
//!   returned. Captured output is discarded.
//!
//! Not a sandbox: apart from the wall-clock bound the child can do whatever
//! the calling user can.
//!
//! Each call owns its child, pipes and buffers, so concurrent calls on
//! different executables do not interfere. Nothing is cached.

mod error;
mod executor;
mod request;
mod result;

#[cfg(test)]
mod tests;

pub use error::RunError;
pub use executor::execute;
pub use request::{ExecutionRequest, DEFAULT_TIMEOUT};
pub use result::ExecutionResult;

use std::path::PathBuf;

/// Run `executable` with `args` and the default timeout
///
/// Convenience wrapper around [`execute`] for the common case of no stdin
/// and no working directory.
pub fn run_binary<I, S>(executable: impl Into<PathBuf>, args: I) -> Result<ExecutionResult, RunError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    execute(&ExecutionRequest::new(executable).args(args))
}
