//! Verification cases for lab executables
//!
//! Each lab gets a [`LabSuite`]: the lab's directory and binary name plus a
//! list of [`LabCase`]s. A case runs the binary once through the process
//! runner (working directory = lab directory) and checks its
//! [`Expectation`]s against the capture.
//!
//! A runner failure (missing binary, timeout) fails that case only; the
//! remaining cases and labs still run.

mod case;
mod catalog;
mod expect;
mod layout;
mod result;
mod runner;

pub use case::{LabCase, LabSuite, Prepare};
pub use catalog::{catalog, find_suite};
pub use expect::Expectation;
pub use layout::LabLayout;
pub use result::{CaseOutcome, CaseStatus, SuiteResult};
pub use runner::{run_case, run_suite, run_suites, RunOptions};
