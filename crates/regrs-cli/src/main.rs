use regrs_core::cmd::cli::Cli;
use regrs_core::cmd::config::Config;
use regrs_core::logging;

use clap::Parser;
use std::process;

fn main() {
    if let Err(e) = logging::init() {
        eprintln!("{e}");
    }

    let cli = Cli::parse();
    let cfg: Config = cli.into_config();
    if let Err(e) = cfg.run() {
        tracing::error!("{e}");
        process::exit(1);
    }
}
