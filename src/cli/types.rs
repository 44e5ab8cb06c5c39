use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "labcheck")]
#[command(about = "Black-box verification harness for lab executables", long_about = None)]
#[command(version)]
#[command(subcommand_help_heading = "Commands")]
pub struct Cli {
    /// Configuration file (defaults to ./labcheck.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one binary, forwarding its output and exit code
    Run {
        /// Timeout in seconds (overrides the configured value)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout: Option<u64>,

        /// Do not add executable permission to the binary before running it
        #[arg(long)]
        no_chmod: bool,

        /// Path to the binary
        binary: PathBuf,

        /// Arguments passed to the binary unmodified
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Run the built-in verification cases against built lab binaries
    Verify {
        /// Directory containing the lab directories
        #[arg(long)]
        labs_root: Option<PathBuf>,

        /// Only run these labs (id like "03" or directory name); repeatable
        #[arg(short, long = "lab")]
        labs: Vec<String>,

        /// Run different labs on separate threads
        #[arg(short, long)]
        parallel: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List known labs and whether their binaries are built
    List {
        /// Directory containing the lab directories
        #[arg(long)]
        labs_root: Option<PathBuf>,

        /// Show each case and its expectations
        #[arg(short, long)]
        verbose: bool,
    },
}
