//! cidx search - Free-text search within one catalog type

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::OutputFormat;
use crate::cli::output::{HumanLayout, emit_human, emit_jsonl, emit_tsv};
use crate::error::Result;

use super::{ItemSummary, detail_line, emit_data, print_load_warnings, variant_labels};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Catalog type (e.g. skins, stickers, cases; aliases like liquids work too)
    pub category: String,

    /// Search words; empty or single-letter queries match everything
    #[arg(num_args = 0..)]
    pub query: Vec<String>,

    /// Maximum number of results (default: search.default_limit)
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show every match, ignoring the limit
    #[arg(long, conflicts_with = "limit")]
    pub all: bool,
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    #[serde(rename = "type")]
    category: &'a str,
    query: String,
    total: usize,
    shown: usize,
    items: Vec<ItemSummary<'a>>,
}

pub fn run(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let index = ctx.store.require_index(&args.category)?;
    let query = args.query.join(" ");
    let results = index.search(&query);

    let limit = if args.all {
        usize::MAX
    } else {
        args.limit.unwrap_or(ctx.config.search.default_limit)
    };
    let total = results.len();
    let items: Vec<ItemSummary<'_>> = results
        .into_iter()
        .take(limit)
        .map(ItemSummary::from)
        .collect();

    let output = SearchOutput {
        category: index.name(),
        query,
        total,
        shown: items.len(),
        items,
    };

    match ctx.output_format {
        OutputFormat::Json => emit_data(ctx, &output),
        OutputFormat::Jsonl => emit_jsonl(&output.items),
        OutputFormat::Tsv => {
            emit_tsv(
                &["index", "name", "category", "pattern", "variants"],
                &output.items,
                |item| {
                    vec![
                        item.index.to_string(),
                        item.name.to_string(),
                        item.category.to_string(),
                        item.pattern.to_string(),
                        item.variants
                            .iter()
                            .map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join(","),
                    ]
                },
            );
            Ok(())
        }
        OutputFormat::Human | OutputFormat::Plain => {
            search_human(ctx, &output);
            Ok(())
        }
    }
}

fn search_human(ctx: &AppContext, output: &SearchOutput<'_>) {
    let colors = ctx.output_format.use_colors();
    print_load_warnings(ctx);

    if output.total == 0 {
        let message = format!("No matches for '{}' in {}", output.query, output.category);
        if colors {
            println!("{}", message.dimmed());
        } else {
            println!("{message}");
        }
        return;
    }

    let mut layout = if colors {
        HumanLayout::new()
    } else {
        HumanLayout::plain()
    };
    let title = if output.query.trim().is_empty() {
        format!("{} items in {}", output.total, output.category)
    } else {
        format!(
            "{} matches for '{}' in {}",
            output.total, output.query, output.category
        )
    };
    layout.title(&title);

    let Some(index) = ctx.store.get_index_for_type(output.category) else {
        return;
    };
    for summary in &output.items {
        let Some(item) = index.item(summary.index) else {
            continue;
        };
        let name = if colors {
            item.base_name.bold().to_string()
        } else {
            item.base_name.clone()
        };
        let details = detail_line(item);
        let variants = variant_labels(item, colors);
        if details.is_empty() {
            layout.push_line(format!("{name}  [{variants}]"));
        } else {
            layout.push_line(format!("{name}  [{variants}]  {details}"));
        }
    }

    if output.shown < output.total {
        layout.blank().push_line(format!(
            "showing {} of {} (use --limit or --all for more)",
            output.shown, output.total
        ));
    }
    emit_human(layout);
}
