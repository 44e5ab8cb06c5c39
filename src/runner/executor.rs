//! Low-level process execution

use std::fs;
use std::io::{self, Read, Write};
use std::os::unix::fs::PermissionsExt;
use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use nix::errno::Errno;
use tracing::{debug, warn};
use wait_timeout::ChildExt;

use super::error::RunError;
use super::request::ExecutionRequest;
use super::result::ExecutionResult;
use crate::process::kill_process_group;

/// Longest wait for pipes to reach EOF after the child has exited
const OUTPUT_COLLECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Shortest post-exit drain, even when the request's timeout is nearly spent
const MIN_DRAIN_GRACE: Duration = Duration::from_millis(250);

/// Wait for EOF after killing leftover processes in the child's group
const STRAGGLER_KILL_GRACE: Duration = Duration::from_millis(200);

/// Appended to a stream that exceeded `MAX_OUTPUT_SIZE`
const TRUNCATION_MARKER: &str = "\n[output truncated at 10MB]";

/// Maximum bytes kept per captured stream (10MB)
const MAX_OUTPUT_SIZE: usize = 10 * 1024 * 1024;

/// Mode bits added to an artifact before it is spawned
const EXECUTABLE_MODE: u32 = 0o755;

/// Spawn attempts made while the artifact reports ETXTBSY
const TEXT_BUSY_ATTEMPTS: u32 = 5;
const TEXT_BUSY_BACKOFF: Duration = Duration::from_millis(20);

/// Run an executable once and capture its behavior
///
/// The path is checked before anything is spawned: a missing path yields
/// [`RunError::NotFound`], anything other than a regular file yields
/// [`RunError::InvalidTarget`]. When `ensure_executable` is set the file's
/// mode gains `0o755`.
///
/// The child runs in its own process group with stdout and stderr drained
/// by separate threads. If it is still running when `request.timeout`
/// elapses, the whole group is killed and [`RunError::Timeout`] is returned;
/// whatever output was captured up to then is dropped.
///
/// Once the child has exited, its pipes are drained until EOF or until the
/// rest of `request.timeout` is spent (at least `MIN_DRAIN_GRACE`, at most
/// `OUTPUT_COLLECTION_TIMEOUT`). A pipe still held open after that by a
/// descendant keeps the bytes read so far.
pub fn execute(request: &ExecutionRequest) -> Result<ExecutionResult, RunError> {
    let path = request.executable.as_path();

    check_target(path)?;
    if request.ensure_executable {
        ensure_executable(path)?;
    }

    let start = Instant::now();
    let mut guard = ChildGuard::new(spawn(request)?);

    debug!(
        executable = %path.display(),
        pid = guard.pid(),
        args = ?request.args,
        "spawned child"
    );

    // The writer owns the pipe; dropping it on return closes the child's stdin.
    if let (Some(mut stdin), Some(payload)) = (guard.child.stdin.take(), request.stdin.clone()) {
        thread::spawn(move || {
            if let Err(e) = stdin.write_all(&payload) {
                // Children that never read their input close the pipe early.
                if e.kind() != io::ErrorKind::BrokenPipe {
                    debug!(error = %e, "failed to write child stdin");
                }
            }
        });
    }

    // Start reading BEFORE waiting: a child that fills a pipe buffer (~64KB)
    // blocks on write() until someone drains it.
    let (done_tx, done_rx) = mpsc::channel();
    let stdout = spawn_reader(guard.child.stdout.take(), done_tx.clone());
    let stderr = spawn_reader(guard.child.stderr.take(), done_tx);

    let wait_result = guard.child.wait_timeout(request.timeout).map_err(|source| RunError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let status = match wait_result {
        Some(status) => {
            guard.mark_reaped();
            status
        }
        None => {
            guard.terminate();
            warn!(
                executable = %path.display(),
                timeout_ms = request.timeout.as_millis() as u64,
                "child timed out and was killed"
            );
            return Err(RunError::Timeout {
                path: path.to_path_buf(),
                timeout: request.timeout,
            });
        }
    };

    let exited = Instant::now();
    let duration = exited - start;
    let deadline = drain_deadline(start, request.timeout, exited);
    collect_output(&done_rx, READER_COUNT, deadline, guard.pid(), path);
    let exit_code = exit_code(status);

    debug!(
        executable = %path.display(),
        exit_code,
        duration_ms = duration.as_millis() as u64,
        "child exited"
    );

    Ok(ExecutionResult::new(
        path.to_path_buf(),
        stdout.text(),
        stderr.text(),
        exit_code,
        duration,
    ))
}

/// Verify the path exists and is a regular file (symlinks are followed)
pub(crate) fn check_target(path: &Path) -> Result<(), RunError> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(RunError::NotFound {
                path: path.to_path_buf(),
            })
        }
        Err(source) => {
            return Err(RunError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if !metadata.is_file() {
        return Err(RunError::InvalidTarget {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

/// Add the executable bits to `path` if any of them are missing
pub(crate) fn ensure_executable(path: &Path) -> Result<(), RunError> {
    let to_error = |source| RunError::Permissions {
        path: path.to_path_buf(),
        source,
    };

    let mut permissions = fs::metadata(path).map_err(to_error)?.permissions();
    let mode = permissions.mode();
    if mode & EXECUTABLE_MODE == EXECUTABLE_MODE {
        return Ok(());
    }

    permissions.set_mode(mode | EXECUTABLE_MODE);
    fs::set_permissions(path, permissions).map_err(to_error)?;
    debug!(path = %path.display(), old_mode = %format!("{:o}", mode & 0o7777), "made executable");
    Ok(())
}

/// Spawn the child in a fresh process group with piped stdio
///
/// The program path is made absolute first: a bare name would otherwise be
/// looked up on `PATH`, and a relative path combined with `current_dir` is
/// resolved differently across platforms.
fn spawn(request: &ExecutionRequest) -> Result<Child, RunError> {
    let path = request.executable.as_path();
    let program = absolute_program(path)?;

    let mut cmd = Command::new(&program);
    cmd.args(&request.args)
        .stdin(if request.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .process_group(0);

    if let Some(dir) = &request.working_dir {
        cmd.current_dir(dir);
    }

    let mut attempt = 1;
    loop {
        match cmd.spawn() {
            Ok(child) => return Ok(child),
            // A freshly written artifact can still be open for writing in a
            // process forked elsewhere between its open() and exec().
            Err(e) if e.raw_os_error() == Some(Errno::ETXTBSY as i32)
                && attempt < TEXT_BUSY_ATTEMPTS =>
            {
                debug!(path = %path.display(), attempt, "text file busy, retrying spawn");
                attempt += 1;
                thread::sleep(TEXT_BUSY_BACKOFF);
            }
            Err(source) => {
                return Err(RunError::Spawn {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }
}

fn absolute_program(path: &Path) -> Result<PathBuf, RunError> {
    std::path::absolute(path).map_err(|source| RunError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode an exit status, mapping death by signal `N` to `-N`
fn exit_code(status: ExitStatus) -> i32 {
    status
        .code()
        .or_else(|| status.signal().map(|sig| -sig))
        .unwrap_or(-1)
}

/// Readers started per child: stdout and stderr
const READER_COUNT: usize = 2;

/// Bytes drained from one child pipe so far
///
/// Shared between the reader thread and `execute`, so a pipe that never
/// reaches EOF still yields what was read from it.
#[derive(Clone, Default)]
struct Capture(Arc<Mutex<CaptureBuf>>);

#[derive(Default)]
struct CaptureBuf {
    bytes: Vec<u8>,
    truncated: bool,
}

impl Capture {
    /// Append a chunk, keeping at most `MAX_OUTPUT_SIZE` bytes
    fn push(&self, chunk: &[u8]) {
        let mut buf = self.lock();
        let keep = chunk.len().min(MAX_OUTPUT_SIZE.saturating_sub(buf.bytes.len()));
        buf.bytes.extend_from_slice(&chunk[..keep]);
        if keep < chunk.len() {
            buf.truncated = true;
        }
    }

    /// Lossy UTF-8 text of everything captured, with a marker if truncated
    fn text(&self) -> String {
        let buf = self.lock();
        let mut text = String::from_utf8_lossy(&buf.bytes).into_owned();
        if buf.truncated {
            text.push_str(TRUNCATION_MARKER);
        }
        text
    }

    fn lock(&self) -> MutexGuard<'_, CaptureBuf> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Drain a pipe on its own thread, signalling `done` at EOF
fn spawn_reader<R>(stream: Option<R>, done: Sender<()>) -> Capture
where
    R: Read + Send + 'static,
{
    let capture = Capture::default();
    match stream {
        Some(stream) => {
            let sink = capture.clone();
            thread::spawn(move || {
                read_stream(stream, &sink);
                let _ = done.send(());
            });
        }
        None => {
            let _ = done.send(());
        }
    }
    capture
}

/// Read a stream to EOF into `capture`
///
/// Past `MAX_OUTPUT_SIZE` the stream is still drained (so the writer never
/// blocks on a full pipe) but the excess is discarded.
fn read_stream<R: Read>(mut stream: R, capture: &Capture) {
    let mut chunk = [0u8; 8192];
    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => capture.push(&chunk[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(_) => break,
        }
    }
}

/// When post-exit draining gives up
///
/// The remaining part of the request's timeout, clamped to
/// `MIN_DRAIN_GRACE..=OUTPUT_COLLECTION_TIMEOUT`.
fn drain_deadline(start: Instant, timeout: Duration, exited: Instant) -> Instant {
    let remaining = (start + timeout).saturating_duration_since(exited);
    exited + remaining.clamp(MIN_DRAIN_GRACE, OUTPUT_COLLECTION_TIMEOUT)
}

/// Wait until `pending` readers have signalled EOF or `deadline` passes
///
/// Returns how many readers are still pending.
fn wait_for_readers(done: &Receiver<()>, mut pending: usize, deadline: Instant) -> usize {
    while pending > 0 {
        let wait = deadline.saturating_duration_since(Instant::now());
        match done.recv_timeout(wait) {
            Ok(()) => pending -= 1,
            // Every sender is gone, so no reader is still running.
            Err(RecvTimeoutError::Disconnected) => return 0,
            Err(RecvTimeoutError::Timeout) => break,
        }
    }
    pending
}

/// Wait for the reader threads after the child has exited
///
/// A descendant the child left behind can keep a pipe open past the
/// child's own exit. If `deadline` passes, the child's group is killed so
/// the readers see EOF. A holder outside the group (e.g. one that called
/// `setsid`) cannot be reached; its pipe is abandoned and the capture keeps
/// what was read.
fn collect_output(done: &Receiver<()>, readers: usize, deadline: Instant, pgid: u32, path: &Path) {
    let pending = wait_for_readers(done, readers, deadline);
    if pending == 0 {
        return;
    }

    warn!(
        executable = %path.display(),
        pgid,
        "pipe still open after exit, killing leftover processes"
    );
    kill_process_group(pgid);

    let pending = wait_for_readers(done, pending, Instant::now() + STRAGGLER_KILL_GRACE);
    if pending > 0 {
        warn!(
            executable = %path.display(),
            pending,
            "pipe held open outside the process group, keeping output read so far"
        );
    }
}

/// Owns a spawned child until it has been reaped
///
/// Dropping the guard on any path that has not reaped the child (early
/// return, panic, timeout) kills the child's process group and waits for
/// the child, so no process outlives the invocation that started it.
struct ChildGuard {
    child: Child,
    reaped: bool,
}

impl ChildGuard {
    fn new(child: Child) -> Self {
        Self {
            child,
            reaped: false,
        }
    }

    /// The child's PID, which is also its process group id
    fn pid(&self) -> u32 {
        self.child.id()
    }

    fn mark_reaped(&mut self) {
        self.reaped = true;
    }

    fn terminate(&mut self) {
        if self.reaped {
            return;
        }
        // The leader is not reaped yet, so its pgid cannot have been recycled.
        kill_process_group(self.pid());
        let _ = self.child.kill();
        let _ = self.child.wait();
        self.reaped = true;
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        self.terminate();
    }
}
