//! Runs lab suites through the process runner

use std::fs;
use std::io;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::case::{LabCase, LabSuite, Prepare};
use super::layout::LabLayout;
use super::result::{CaseOutcome, CaseStatus, SuiteResult};
use crate::config::HarnessConfig;
use crate::runner::{execute, ExecutionRequest, DEFAULT_TIMEOUT};

/// Settings copied into every request a suite makes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub timeout: Duration,
    pub ensure_executable: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            ensure_executable: true,
        }
    }
}

impl From<&HarnessConfig> for RunOptions {
    fn from(config: &HarnessConfig) -> Self {
        Self {
            timeout: config.timeout(),
            ensure_executable: config.ensure_executable,
        }
    }
}

/// Run one case: prepare the lab directory, invoke the binary, check results
///
/// The child runs with the lab directory as its working directory, so
/// relative data files (`input.txt`, `output.txt`) resolve inside the lab.
pub fn run_case(
    layout: &LabLayout,
    suite: &LabSuite,
    case: &LabCase,
    options: &RunOptions,
) -> CaseOutcome {
    let start = Instant::now();
    let lab_dir = layout.lab_dir(suite);

    if let Err(e) = prepare(layout, suite, &case.prepare) {
        return CaseOutcome::new(
            &suite.id,
            &case.name,
            CaseStatus::Error {
                kind: "prepare".to_string(),
                message: e.to_string(),
            },
            start.elapsed(),
        );
    }

    let mut request = ExecutionRequest::new(layout.binary_path(suite))
        .args(case.args.iter().cloned())
        .timeout(options.timeout)
        .working_dir(&lab_dir)
        .ensure_executable(options.ensure_executable);
    if let Some(input) = &case.stdin {
        request = request.stdin(input.as_bytes());
    }

    let status = match execute(&request) {
        Ok(result) => {
            let failures: Vec<String> = case
                .expectations
                .iter()
                .filter_map(|expectation| expectation.check(&result, &lab_dir).err())
                .collect();
            if failures.is_empty() {
                CaseStatus::Passed
            } else {
                CaseStatus::Failed { failures }
            }
        }
        Err(e) => CaseStatus::Error {
            kind: e.kind().to_string(),
            message: e.to_string(),
        },
    };

    let outcome = CaseOutcome::new(&suite.id, &case.name, status, start.elapsed());
    debug!(outcome = %outcome.summary(), "case finished");
    outcome
}

/// Run every case of a suite in order
///
/// Cases of one lab share its directory (the file I/O lab writes
/// `output.txt`), so they never run concurrently.
pub fn run_suite(layout: &LabLayout, suite: &LabSuite, options: &RunOptions) -> SuiteResult {
    info!(lab = %suite.id, binary = %layout.binary_path(suite).display(), "running suite");

    let outcomes = suite
        .cases
        .iter()
        .map(|case| run_case(layout, suite, case, options))
        .collect();

    let result = SuiteResult::from_outcomes(&suite.id, outcomes);
    info!(
        lab = %suite.id,
        passed = result.passed_count(),
        failed = result.failed_count(),
        "suite finished"
    );
    result
}

/// Run several suites, optionally one thread per lab
///
/// Results come back in the order of `suites` either way.
pub fn run_suites(
    layout: &LabLayout,
    suites: &[LabSuite],
    options: &RunOptions,
    parallel: bool,
) -> Vec<SuiteResult> {
    if !parallel {
        return suites
            .iter()
            .map(|suite| run_suite(layout, suite, options))
            .collect();
    }

    thread::scope(|scope| {
        let handles: Vec<_> = suites
            .iter()
            .map(|suite| scope.spawn(move || run_suite(layout, suite, options)))
            .collect();

        handles
            .into_iter()
            .zip(suites)
            .map(|(handle, suite)| {
                handle.join().unwrap_or_else(|_| {
                    SuiteResult::from_outcomes(
                        &suite.id,
                        vec![CaseOutcome::new(
                            &suite.id,
                            "<suite>",
                            CaseStatus::Error {
                                kind: "panic".to_string(),
                                message: "suite thread panicked".to_string(),
                            },
                            Duration::ZERO,
                        )],
                    )
                })
            })
            .collect()
    })
}

fn prepare(layout: &LabLayout, suite: &LabSuite, steps: &[Prepare]) -> io::Result<()> {
    for step in steps {
        match step {
            Prepare::RemoveFile(name) => {
                let path = layout.lab_file(suite, name);
                match fs::remove_file(&path) {
                    Ok(()) => debug!(path = %path.display(), "removed stale file"),
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => {
                        return Err(io::Error::new(
                            e.kind(),
                            format!("failed to remove {}: {e}", path.display()),
                        ))
                    }
                }
            }
        }
    }
    Ok(())
}
