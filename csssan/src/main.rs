// csssan/src/main.rs
//! csssan entry point.

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use csssan::cli::{Cli, Commands};
use csssan::commands::{run_sanitize, run_scan};
use csssan::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(LevelFilter::Off)
    } else if cli.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    match cli.command {
        Commands::Sanitize(cmd) => run_sanitize(&cmd, cli.quiet),
        Commands::Scan(cmd) => run_scan(&cmd, cli.quiet),
    }
}
