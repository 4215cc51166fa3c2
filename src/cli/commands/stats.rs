//! cidx stats - Index statistics and load failures

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::app::AppContext;
use crate::catalog::CatalogKind;
use crate::cli::OutputFormat;
use crate::cli::output::{HumanLayout, emit_human, emit_jsonl, emit_tsv};
use crate::error::Result;
use crate::search::IndexStats;
use crate::store::CategoryFailure;

use super::emit_data;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Only report this catalog type
    pub category: Option<String>,
}

#[derive(Serialize)]
struct CategoryStats<'a> {
    #[serde(rename = "type")]
    category: &'a str,
    kind: CatalogKind,
    #[serde(flatten)]
    stats: IndexStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure: Option<&'a CategoryFailure>,
}

#[derive(Serialize)]
struct StatsOutput<'a> {
    loaded: usize,
    total: usize,
    categories: Vec<CategoryStats<'a>>,
    totals: IndexStats,
}

pub fn run(ctx: &AppContext, args: &StatsArgs) -> Result<()> {
    let report = ctx.store.load_report();
    let indexes = match &args.category {
        Some(category) => vec![ctx.store.require_index(category)?],
        None => ctx.store.indexes().collect(),
    };

    let categories: Vec<CategoryStats<'_>> = indexes
        .into_iter()
        .map(|index| CategoryStats {
            category: index.name(),
            kind: index.kind(),
            stats: index.stats(),
            failure: report.failure_for(index.name()),
        })
        .collect();
    let totals = sum_stats(categories.iter().map(|c| c.stats));

    let output = StatsOutput {
        loaded: report.loaded,
        total: report.total,
        categories,
        totals,
    };

    match ctx.output_format {
        OutputFormat::Json => emit_data(ctx, &output),
        OutputFormat::Jsonl => emit_jsonl(&output.categories),
        OutputFormat::Tsv => {
            emit_tsv(
                &["type", "kind", "base_items", "raw_items", "dropped", "tokens", "status"],
                &output.categories,
                |c| {
                    vec![
                        c.category.to_string(),
                        c.kind.to_string(),
                        c.stats.base_items.to_string(),
                        c.stats.raw_items.to_string(),
                        c.stats.dropped.to_string(),
                        c.stats.tokens.to_string(),
                        c.failure
                            .map_or_else(|| "ok".to_string(), |f| f.code.to_string()),
                    ]
                },
            );
            Ok(())
        }
        OutputFormat::Human | OutputFormat::Plain => {
            stats_human(ctx, &output);
            Ok(())
        }
    }
}

fn sum_stats(stats: impl Iterator<Item = IndexStats>) -> IndexStats {
    stats.fold(IndexStats::default(), |acc, s| IndexStats {
        base_items: acc.base_items + s.base_items,
        raw_items: acc.raw_items + s.raw_items,
        dropped: acc.dropped + s.dropped,
        overwritten: acc.overwritten + s.overwritten,
        tokens: acc.tokens + s.tokens,
        postings_entries: acc.postings_entries + s.postings_entries,
    })
}

fn stats_human(ctx: &AppContext, output: &StatsOutput<'_>) {
    let colors = ctx.output_format.use_colors();
    let mut layout = if colors {
        HumanLayout::new()
    } else {
        HumanLayout::plain()
    };

    layout.title("Catalog Index Statistics").kv(
        "Loaded",
        &format!("{}/{} categories", output.loaded, output.total),
    );

    for category in &output.categories {
        layout.blank().section(category.category);
        layout
            .kv("Kind", category.kind.as_str())
            .kv("Base items", &category.stats.base_items.to_string())
            .kv("Raw items", &category.stats.raw_items.to_string())
            .kv("Tokens", &category.stats.tokens.to_string())
            .kv("Postings", &category.stats.postings_entries.to_string());
        if category.stats.dropped > 0 {
            layout.kv("Dropped", &category.stats.dropped.to_string());
        }
        if category.stats.overwritten > 0 {
            layout.kv("Overwritten", &category.stats.overwritten.to_string());
        }
        if let Some(failure) = category.failure {
            let line = format!("failed [{}]: {}", failure.code, failure.message);
            let line = if colors { line.red().to_string() } else { line };
            layout.push_line(line);
        }
    }

    if output.categories.len() > 1 {
        layout
            .blank()
            .section("Totals")
            .kv("Base items", &output.totals.base_items.to_string())
            .kv("Raw items", &output.totals.raw_items.to_string());
    }
    emit_human(layout);
}
