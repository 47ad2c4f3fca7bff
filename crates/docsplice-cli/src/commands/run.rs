//! `embed` and `strip`
//!
//! Both commands run the pipeline over a file or tree and print one line per
//! file plus a summary. Any structural file failure makes the command fail.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use colored::Colorize;
use docsplice_agent::CommandGenerator;
use docsplice_core::{FileReport, FileStatus, Operation, RunReport, Runner, Settings};

use crate::cli::RunArgs;
use crate::error::{CliError, Result};

/// Run the embed command
pub fn run_embed(
    config: Option<&Path>,
    args: &RunArgs,
    replace: bool,
    generator: Option<String>,
    cancel: Arc<AtomicBool>,
) -> Result<()> {
    let mut settings = Settings::load(&args.path, config)?;
    if let Some(command) = generator {
        settings.generator.command = Some(command);
    }

    let generator = CommandGenerator::new(settings.generator.clone())?.with_cancel(cancel.clone());
    tracing::debug!(program = %generator.program().display(), "Using generator");

    let runner = runner(settings, Operation::Embed { replace }, args, cancel)
        .with_generator(Arc::new(generator));
    execute(&runner, args)
}

/// Run the strip command
pub fn run_strip(config: Option<&Path>, args: &RunArgs, cancel: Arc<AtomicBool>) -> Result<()> {
    let settings = Settings::load(&args.path, config)?;
    let runner = runner(settings, Operation::Strip, args, cancel);
    execute(&runner, args)
}

fn runner(
    settings: Settings,
    operation: Operation,
    args: &RunArgs,
    cancel: Arc<AtomicBool>,
) -> Runner {
    let mut runner = Runner::new(settings, operation)
        .dry_run(args.dry_run)
        .with_cancel(cancel);
    if let Some(jobs) = args.jobs {
        runner = runner.with_workers(jobs);
    }
    runner
}

fn execute(runner: &Runner, args: &RunArgs) -> Result<()> {
    let report = runner.run(&args.path)?;

    for file in &report.files {
        print_file(file);
    }
    print_summary(&report, args.dry_run);

    if report.has_failures() {
        return Err(CliError::user(format!(
            "{} file(s) could not be processed",
            report.failed()
        )));
    }
    if report.cancelled {
        return Err(CliError::user("Cancelled"));
    }
    Ok(())
}

fn print_file(file: &FileReport) {
    let path = file.path.display().to_string();
    match &file.status {
        FileStatus::Unchanged => println!("  {} {}", "unchanged".dimmed(), path),
        FileStatus::Modified => println!("  {} {}", "modified".green(), path),
        FileStatus::WouldModify => {
            println!("  {} {}", "would modify".yellow(), path);
            if let Some(diff) = &file.diff {
                print_diff(diff);
            }
        }
        FileStatus::Cancelled => println!("  {} {}", "cancelled".yellow(), path),
        FileStatus::Failed(reason) => println!("  {} {}: {}", "failed".red().bold(), path, reason),
    }

    for failure in &file.splice.failures {
        println!("    {} {}", "!".red(), failure);
    }
}

fn print_diff(diff: &str) {
    for line in diff.lines() {
        let colored = if line.starts_with("+++") || line.starts_with("---") {
            line.bold()
        } else if line.starts_with('+') {
            line.green()
        } else if line.starts_with('-') {
            line.red()
        } else if line.starts_with("@@") {
            line.cyan()
        } else {
            line.normal()
        };
        println!("    {}", colored);
    }
}

fn print_summary(report: &RunReport, dry_run: bool) {
    let label = if dry_run { "Dry run" } else { "Done" };
    println!();
    println!(
        "{} {} file(s): {} {}, {} unchanged, {} failed, {} partial ({} lines removed, {} inserted)",
        label.blue().bold(),
        report.files.len(),
        report.modified(),
        if dry_run { "would change" } else { "modified" },
        report.unchanged(),
        report.failed(),
        report.partial(),
        report.removed_lines(),
        report.inserted_lines(),
    );
}
