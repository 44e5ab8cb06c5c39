//! Assertions over a captured run

use std::fmt;
use std::fs;
use std::path::Path;

use crate::runner::ExecutionResult;
use crate::utils::{contains_number_token, truncate_string};

/// How much captured output a failure message quotes
const QUOTE_LIMIT: usize = 200;

/// One property a lab run must satisfy
///
/// File names are relative to the lab directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    ExitCode(i32),
    StdoutEquals(String),
    StdoutContains(String),
    /// At least one of the needles appears
    StdoutContainsAny(Vec<String>),
    StdoutContainsIgnoreCase(String),
    StdoutEndsWith(String),
    StderrEmpty,
    FileExists(String),
    /// Byte-for-byte equality of a produced file and a reference file
    FilesEqual {
        produced: String,
        reference: String,
    },
    /// The size of a file in bytes appears as a number in stdout
    StdoutContainsFileSize(String),
}

impl Expectation {
    pub fn contains(needle: &str) -> Self {
        Expectation::StdoutContains(needle.to_string())
    }

    pub fn contains_any(needles: &[&str]) -> Self {
        Expectation::StdoutContainsAny(needles.iter().map(|n| n.to_string()).collect())
    }

    /// Check the expectation, returning a failure reason if it does not hold
    pub fn check(&self, result: &ExecutionResult, lab_dir: &Path) -> Result<(), String> {
        let stdout = &result.stdout;
        let holds = match self {
            Expectation::ExitCode(code) => result.exit_code == *code,
            Expectation::StdoutEquals(expected) => stdout == expected,
            Expectation::StdoutContains(needle) => stdout.contains(needle.as_str()),
            Expectation::StdoutContainsAny(needles) => {
                needles.iter().any(|n| stdout.contains(n.as_str()))
            }
            Expectation::StdoutContainsIgnoreCase(needle) => {
                stdout.to_lowercase().contains(&needle.to_lowercase())
            }
            Expectation::StdoutEndsWith(suffix) => stdout.ends_with(suffix.as_str()),
            Expectation::StderrEmpty => result.stderr.is_empty(),
            Expectation::FileExists(name) => lab_dir.join(name).is_file(),
            Expectation::FilesEqual {
                produced,
                reference,
            } => return files_equal(&lab_dir.join(produced), &lab_dir.join(reference)),
            Expectation::StdoutContainsFileSize(name) => {
                let path = lab_dir.join(name);
                let size = fs::metadata(&path)
                    .map_err(|e| format!("cannot stat {}: {e}", path.display()))?
                    .len();
                if contains_number_token(stdout, size) {
                    return Ok(());
                }
                return Err(format!(
                    "stdout does not contain the size of {name} ({size} bytes); stdout: {:?}",
                    truncate_string(stdout, QUOTE_LIMIT)
                ));
            }
        };

        if holds {
            Ok(())
        } else {
            Err(self.mismatch(result))
        }
    }

    fn mismatch(&self, result: &ExecutionResult) -> String {
        match self {
            Expectation::ExitCode(code) => {
                format!("expected exit code {code}, got {}", result.exit_code)
            }
            Expectation::StderrEmpty => format!(
                "expected empty stderr, got {:?}",
                truncate_string(&result.stderr, QUOTE_LIMIT)
            ),
            Expectation::FileExists(name) => format!("{name} does not exist"),
            _ => format!(
                "{self} failed; stdout: {:?}",
                truncate_string(&result.stdout, QUOTE_LIMIT)
            ),
        }
    }
}

fn files_equal(produced: &Path, reference: &Path) -> Result<(), String> {
    let read = |path: &Path| {
        fs::read(path).map_err(|e| format!("cannot read {}: {e}", path.display()))
    };
    let produced_bytes = read(produced)?;
    let reference_bytes = read(reference)?;

    if produced_bytes == reference_bytes {
        Ok(())
    } else {
        Err(format!(
            "{} ({} bytes) differs from {} ({} bytes)",
            produced.display(),
            produced_bytes.len(),
            reference.display(),
            reference_bytes.len()
        ))
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::ExitCode(code) => write!(f, "exit code is {code}"),
            Expectation::StdoutEquals(s) => write!(f, "stdout equals {s:?}"),
            Expectation::StdoutContains(s) => write!(f, "stdout contains {s:?}"),
            Expectation::StdoutContainsAny(needles) => {
                write!(f, "stdout contains one of {needles:?}")
            }
            Expectation::StdoutContainsIgnoreCase(s) => {
                write!(f, "stdout contains {s:?} (any case)")
            }
            Expectation::StdoutEndsWith(s) => write!(f, "stdout ends with {s:?}"),
            Expectation::StderrEmpty => write!(f, "stderr is empty"),
            Expectation::FileExists(name) => write!(f, "{name} exists"),
            Expectation::FilesEqual {
                produced,
                reference,
            } => write!(f, "{produced} matches {reference}"),
            Expectation::StdoutContainsFileSize(name) => {
                write!(f, "stdout contains the byte size of {name}")
            }
        }
    }
}
