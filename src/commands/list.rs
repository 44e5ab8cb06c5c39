//! List command - show the lab catalog and which binaries are built

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use crate::config::HarnessConfig;
use crate::labs::{catalog, LabLayout};

/// Execute the list command
pub fn execute(config: &HarnessConfig, labs_root: Option<PathBuf>, verbose: bool) -> Result<()> {
    let layout = LabLayout::new(labs_root.unwrap_or_else(|| config.labs_root.clone()));

    for suite in catalog() {
        let marker = if layout.binary_present(&suite) {
            "✓".green().bold()
        } else {
            "✗".red().bold()
        };
        println!(
            "{} {} {} ({} cases) {}",
            marker,
            suite.id.bold(),
            suite.title,
            suite.cases.len(),
            layout.binary_path(&suite).display().to_string().dimmed()
        );

        if verbose {
            for case in &suite.cases {
                let args = if case.args.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", case.args.join(" "))
                };
                println!("    {}{}", case.name, args.dimmed());
                for expectation in &case.expectations {
                    println!("      {} {}", "−".dimmed(), expectation);
                }
            }
        }
    }

    Ok(())
}
