//! validate-samples: check sample metadata against an ENA checklist.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::Cli;
use logging::{init_logging, LogConfig};

fn main() {
    let cli = Cli::parse();

    init_logging(&LogConfig::from_verbosity(cli.verbose, cli.quiet));

    if let Err(e) = commands::validate::run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
