//! Verify command - run lab suites and report
//!
//! Suites of different labs may run in parallel; cases within one lab always
//! run in order because they share the lab directory.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::HarnessConfig;
use crate::labs::{catalog, run_suites, LabLayout, LabSuite, RunOptions, SuiteResult};

/// Execute the verify command
///
/// Returns the process exit code: 0 when every selected case passed.
pub fn execute(
    config: &HarnessConfig,
    labs_root: Option<PathBuf>,
    selectors: &[String],
    parallel: bool,
    json: bool,
) -> Result<i32> {
    let root = labs_root.unwrap_or_else(|| config.labs_root.clone());
    if !root.is_dir() {
        bail!("Labs root is not a directory: {}", root.display());
    }

    let suites = select_suites(selectors)?;
    let layout = LabLayout::new(root);
    let options = RunOptions::from(config);

    let results = run_suites(&layout, &suites, &options, parallel || config.parallel);

    if json {
        let report =
            serde_json::to_string_pretty(&results).context("Failed to serialize report")?;
        println!("{report}");
    } else {
        print_report(&layout, &suites, &results);
    }

    Ok(if results.iter().all(SuiteResult::all_passed) {
        0
    } else {
        1
    })
}

/// Resolve selectors (`"03"` or `"03_arrays_x86_64"`) to suites; none selects all
pub fn select_suites(selectors: &[String]) -> Result<Vec<LabSuite>> {
    let all = catalog();
    if selectors.is_empty() {
        return Ok(all);
    }

    selectors
        .iter()
        .map(|selector| {
            all.iter()
                .find(|suite| suite.matches(selector))
                .cloned()
                .with_context(|| format!("Unknown lab '{selector}'"))
        })
        .collect()
}

fn print_report(layout: &LabLayout, suites: &[LabSuite], results: &[SuiteResult]) {
    println!(
        "{} Verifying labs in {}\n",
        "→".cyan().bold(),
        layout.root().display()
    );

    for (suite, result) in suites.iter().zip(results) {
        println!("{} {}", format!("[{}]", suite.id).bold(), suite.title);
        for outcome in result.outcomes() {
            if outcome.passed() {
                println!("  {} {}", "✓".green().bold(), outcome.case);
            } else {
                println!("  {} {}", "✗".red().bold(), outcome.case);
                for reason in outcome.reasons() {
                    println!("      {}", reason.dimmed());
                }
            }
        }
        println!();
    }

    let passed: usize = results.iter().map(SuiteResult::passed_count).sum();
    let failed: usize = results.iter().map(SuiteResult::failed_count).sum();
    if failed == 0 {
        println!("{} All {passed} cases passed", "✓".green().bold());
    } else {
        println!(
            "{} {} passed, {} failed",
            "Summary:".bold(),
            passed,
            failed.to_string().red().bold()
        );
    }
}
