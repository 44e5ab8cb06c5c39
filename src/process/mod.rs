//! Process utilities for labcheck
//!
//! Process-group termination for the runner's timeout and cleanup paths.

use nix::errno::Errno;
use nix::sys::signal::{killpg, Signal};
use nix::unistd::{getpgrp, Pid};

/// Send SIGKILL to every member of process group `pgid`
///
/// Returns `true` if the signal was delivered to at least one process.
/// Refuses to signal group 0 (the caller's own group by convention) and the
/// group this process belongs to, so a child that failed to detach into its
/// own group can never take the harness down with it.
pub fn kill_process_group(pgid: u32) -> bool {
    let raw = match i32::try_from(pgid) {
        Ok(v) if v > 0 => v,
        _ => return false,
    };

    let target = Pid::from_raw(raw);
    if target == getpgrp() {
        tracing::warn!(pgid = raw, "refusing to kill our own process group");
        return false;
    }

    match killpg(target, Signal::SIGKILL) {
        Ok(()) => true,
        Err(Errno::ESRCH) => false,
        Err(e) => {
            tracing::warn!(pgid = raw, error = %e, "failed to kill process group");
            false
        }
    }
}
