//! Outcome types for verification runs

use serde::Serialize;
use std::time::Duration;

/// How a single case ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaseStatus {
    Passed,
    /// The binary ran but one or more expectations did not hold
    Failed { failures: Vec<String> },
    /// The binary could not be run to completion (missing, timeout, ...)
    Error { kind: String, message: String },
}

/// Result of running one verification case
#[derive(Debug, Clone, Serialize)]
pub struct CaseOutcome {
    pub lab: String,
    pub case: String,
    #[serde(flatten)]
    pub status: CaseStatus,
    #[serde(serialize_with = "serialize_millis", rename = "duration_ms")]
    pub duration: Duration,
}

impl CaseOutcome {
    pub fn new(lab: &str, case: &str, status: CaseStatus, duration: Duration) -> Self {
        Self {
            lab: lab.to_string(),
            case: case.to_string(),
            status,
            duration,
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self.status, CaseStatus::Passed)
    }

    /// Reasons this case did not pass, one per line of a report
    pub fn reasons(&self) -> Vec<String> {
        match &self.status {
            CaseStatus::Passed => Vec::new(),
            CaseStatus::Failed { failures } => failures.clone(),
            CaseStatus::Error { kind, message } => vec![format!("{kind}: {message}")],
        }
    }

    pub fn summary(&self) -> String {
        let status = match self.status {
            CaseStatus::Passed => "PASSED",
            CaseStatus::Failed { .. } => "FAILED",
            CaseStatus::Error { .. } => "ERROR",
        };
        format!(
            "{} - {}::{} ({}ms)",
            status,
            self.lab,
            self.case,
            self.duration.as_millis()
        )
    }
}

/// Result of running every case of a lab suite
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum SuiteResult {
    AllPassed {
        lab: String,
        outcomes: Vec<CaseOutcome>,
    },
    Failed {
        lab: String,
        outcomes: Vec<CaseOutcome>,
        failures: Vec<String>,
    },
}

impl SuiteResult {
    /// Build from outcomes, collecting `case: reason` lines for every miss
    pub fn from_outcomes(lab: &str, outcomes: Vec<CaseOutcome>) -> Self {
        let failures: Vec<String> = outcomes
            .iter()
            .flat_map(|o| o.reasons().into_iter().map(move |r| format!("{}: {r}", o.case)))
            .collect();

        if failures.is_empty() {
            SuiteResult::AllPassed {
                lab: lab.to_string(),
                outcomes,
            }
        } else {
            SuiteResult::Failed {
                lab: lab.to_string(),
                outcomes,
                failures,
            }
        }
    }

    pub fn all_passed(&self) -> bool {
        matches!(self, SuiteResult::AllPassed { .. })
    }

    pub fn lab(&self) -> &str {
        match self {
            SuiteResult::AllPassed { lab, .. } | SuiteResult::Failed { lab, .. } => lab,
        }
    }

    pub fn outcomes(&self) -> &[CaseOutcome] {
        match self {
            SuiteResult::AllPassed { outcomes, .. } => outcomes,
            SuiteResult::Failed { outcomes, .. } => outcomes,
        }
    }

    pub fn failures(&self) -> Vec<String> {
        match self {
            SuiteResult::AllPassed { .. } => Vec::new(),
            SuiteResult::Failed { failures, .. } => failures.clone(),
        }
    }

    pub fn total_duration(&self) -> Duration {
        self.outcomes().iter().map(|o| o.duration).sum()
    }

    pub fn passed_count(&self) -> usize {
        self.outcomes().iter().filter(|o| o.passed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes().iter().filter(|o| !o.passed()).count()
    }
}

fn serialize_millis<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(duration.as_millis() as u64)
}
