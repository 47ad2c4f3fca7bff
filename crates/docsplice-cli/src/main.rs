//! docsplice CLI
//!
//! Strips documentation strings from source trees and regenerates them with
//! an external generator program.

mod cli;
mod commands;
mod error;
mod logging;
mod signal;

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    tracing::debug!("Verbose mode enabled");

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Embed {
            run,
            replace,
            generator,
        } => commands::run_embed(config, &run, replace, generator, cancel_flag()),
        Commands::Strip { run } => commands::run_strip(config, &run, cancel_flag()),
        Commands::Inspect { path, json } => commands::run_inspect(config, &path, json),
    }
}

fn cancel_flag() -> Arc<AtomicBool> {
    let cancel = Arc::new(AtomicBool::new(false));
    signal::cancel_on_ctrl_c(Arc::clone(&cancel));
    cancel
}
