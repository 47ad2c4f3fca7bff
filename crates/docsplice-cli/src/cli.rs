//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// docsplice - Strip and regenerate documentation strings in source trees
#[derive(Parser, Debug)]
#[command(name = "docsplice")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: docsplice.toml / .json / .yaml in the target)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by commands that rewrite files
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    /// File or directory to process
    pub path: PathBuf,

    /// Files processed concurrently (default: `workers` from the config)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Print a diff instead of writing files
    #[arg(long)]
    pub dry_run: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Generate documentation for every undocumented block
    ///
    /// Examples:
    ///   docsplice embed src/                 # Document what is missing
    ///   docsplice embed src/ --replace       # Regenerate everything
    ///   docsplice embed app.py --dry-run     # Preview as a diff
    Embed {
        #[command(flatten)]
        run: RunArgs,

        /// Remove existing documentation first so every block is regenerated
        #[arg(long)]
        replace: bool,

        /// Generator program (overrides `generator.command` in the config)
        #[arg(long, env = "DOCSPLICE_GENERATOR", value_name = "COMMAND")]
        generator: Option<String>,
    },

    /// Remove all documentation strings
    Strip {
        #[command(flatten)]
        run: RunArgs,
    },

    /// List extracted blocks and their positions
    Inspect {
        /// File to inspect
        path: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
