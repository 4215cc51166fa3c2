//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - `run()` function to execute the command

use colored::Colorize;
use serde::Serialize;

use crate::app::AppContext;
use crate::catalog::Variant;
use crate::cli::Commands;
use crate::cli::output::{RobotStatus, emit_robot, robot_ok};
use crate::error::Result;
use crate::search::{BaseItem, ItemMetadata};

pub mod list;
pub mod search;
pub mod show;
pub mod stats;
pub mod types;

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Search(args) => search::run(ctx, args),
        Commands::List(args) => list::run(ctx, args),
        Commands::Show(args) => show::run(ctx, args),
        Commands::Stats(args) => stats::run(ctx, args),
        Commands::Types(args) => types::run(ctx, args),
    }
}

/// Compact view of a base item for result listings.
#[derive(Debug, Serialize)]
pub struct ItemSummary<'a> {
    pub index: usize,
    pub name: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub category: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub pattern: &'a str,
    pub image: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity: Option<&'a str>,
    pub variants: Vec<Variant>,
    pub metadata: &'a ItemMetadata,
}

impl<'a> From<&'a BaseItem> for ItemSummary<'a> {
    fn from(item: &'a BaseItem) -> Self {
        Self {
            index: item.index,
            name: &item.base_name,
            category: &item.category,
            pattern: &item.pattern,
            image: &item.image,
            rarity: item.rarity.as_ref().map(|r| r.name.as_str()),
            variants: item.variant_tags().collect(),
            metadata: &item.metadata,
        }
    }
}

/// Emit machine output wrapped in the robot envelope, marking partial loads.
pub(crate) fn emit_data<T: Serialize>(ctx: &AppContext, data: T) -> Result<()> {
    let report = ctx.store.load_report();
    let mut response = robot_ok(data).with_warnings(ctx.load_warnings());
    if !report.failures.is_empty() {
        response = response.with_status(RobotStatus::Partial {
            loaded: report.loaded,
            total: report.total,
        });
    }
    emit_robot(&response)
}

/// `normal, stattrak` style variant list, colored in human mode.
pub(crate) fn variant_labels(item: &BaseItem, colors: bool) -> String {
    item.variant_tags()
        .map(|variant| {
            if !colors {
                return variant.as_str().to_string();
            }
            match variant {
                Variant::Normal => variant.as_str().normal().to_string(),
                Variant::StatTrak => variant.as_str().yellow().to_string(),
                Variant::Souvenir => variant.as_str().green().to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// `Rifles · Redline`, skipping empty parts.
pub(crate) fn detail_line(item: &BaseItem) -> String {
    [item.category.as_str(), item.pattern.as_str()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" · ")
}

/// Print human warnings for categories that failed to load.
pub(crate) fn print_load_warnings(ctx: &AppContext) {
    for warning in ctx.load_warnings() {
        eprintln!("{} {}", "!".yellow(), warning);
    }
}
