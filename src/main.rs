use clap::Parser;

mod cli;

use cli::dispatch::dispatch;
use cli::types::Cli;

fn main() {
    labcheck::logging::init();
    let cli = Cli::parse();

    match dispatch(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}
