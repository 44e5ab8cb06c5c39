use anyhow::Result;
use labcheck::commands::{list, run, verify};
use labcheck::config::HarnessConfig;

use super::types::{Cli, Commands};

/// Run the selected command, returning the process exit code
pub fn dispatch(cli: Cli) -> Result<i32> {
    let config = HarnessConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            timeout,
            no_chmod,
            binary,
            args,
        } => run::execute(&config, binary, args, timeout, no_chmod),
        Commands::Verify {
            labs_root,
            labs,
            parallel,
            json,
        } => verify::execute(&config, labs_root, &labs, parallel, json),
        Commands::List { labs_root, verbose } => {
            list::execute(&config, labs_root, verbose).map(|()| 0)
        }
    }
}
