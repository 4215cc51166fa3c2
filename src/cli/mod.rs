//! CLI module - Command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use output::OutputFormat;

pub mod commands;
pub mod output;
pub mod progress;

/// cidx - incremental search over CS2 item catalogs
#[derive(Parser, Debug)]
#[command(name = "cidx")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable JSON output for machine consumption (same as -O json)
    #[arg(long, global = true)]
    pub robot: bool,

    /// Output format (human, json, jsonl, plain, tsv)
    #[arg(long, short = 'O', global = true, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress logs and progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (default: ~/.config/cidx/config.toml, then ./cidx.toml)
    #[arg(long, global = true, env = "CIDX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Catalog source as TYPE=SOURCE (URL, file path or inline JSON array); repeatable
    #[arg(long = "source", short = 's', global = true, value_name = "TYPE=SOURCE")]
    pub sources: Vec<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Effective output format: `--robot` forces JSON, otherwise
    /// `--output-format`, otherwise human.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_args(self.robot, self.output_format)
    }

    /// Whether logs and progress should be machine-readable.
    #[must_use]
    pub fn machine_mode(&self) -> bool {
        self.output_format().is_machine_readable()
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search one catalog type with free text
    Search(commands::search::SearchArgs),

    /// List base items of a catalog type
    List(commands::list::ListArgs),

    /// Show one base item with its variants
    Show(commands::show::ShowArgs),

    /// Index statistics and load failures
    Stats(commands::stats::StatsArgs),

    /// Loaded catalog types and aliases
    Types(commands::types::TypesArgs),
}
