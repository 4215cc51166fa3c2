//! cidx list - List base items of a catalog type

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::OutputFormat;
use crate::cli::output::{emit_jsonl, emit_tsv};
use crate::error::Result;

use super::{ItemSummary, detail_line, emit_data, print_load_warnings, variant_labels};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Catalog type
    pub category: String,

    /// Maximum number of items to show (default: search.default_limit)
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Offset for pagination
    #[arg(long, default_value = "0")]
    pub offset: usize,
}

#[derive(Serialize)]
struct ListOutput<'a> {
    #[serde(rename = "type")]
    category: &'a str,
    total: usize,
    offset: usize,
    items: Vec<ItemSummary<'a>>,
}

pub fn run(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    let index = ctx.store.require_index(&args.category)?;
    let limit = args.limit.unwrap_or(ctx.config.search.default_limit);

    let output = ListOutput {
        category: index.name(),
        total: index.len(),
        offset: args.offset,
        items: index
            .items()
            .iter()
            .skip(args.offset)
            .take(limit)
            .map(ItemSummary::from)
            .collect(),
    };

    match ctx.output_format {
        OutputFormat::Json => emit_data(ctx, &output),
        OutputFormat::Jsonl => emit_jsonl(&output.items),
        OutputFormat::Tsv => {
            emit_tsv(&["index", "name", "category", "pattern"], &output.items, |item| {
                vec![
                    item.index.to_string(),
                    item.name.to_string(),
                    item.category.to_string(),
                    item.pattern.to_string(),
                ]
            });
            Ok(())
        }
        OutputFormat::Human | OutputFormat::Plain => {
            list_human(ctx, &output, args);
            Ok(())
        }
    }
}

fn list_human(ctx: &AppContext, output: &ListOutput<'_>, args: &ListArgs) {
    let colors = ctx.output_format.use_colors();
    print_load_warnings(ctx);

    if output.items.is_empty() {
        println!("No items in {}", output.category);
        return;
    }

    let Some(index) = ctx.store.get_index_for_type(output.category) else {
        return;
    };

    let header = format!("{:>6}  {:48} {}", "#", "NAME", "VARIANTS");
    if colors {
        println!("{}", header.bold());
        println!("{}", "─".repeat(78).dimmed());
    } else {
        println!("{header}");
    }

    for summary in &output.items {
        let Some(item) = index.item(summary.index) else {
            continue;
        };
        let details = detail_line(item);
        let name = if details.is_empty() || details == item.pattern {
            item.base_name.clone()
        } else {
            format!("{} ({})", item.base_name, details)
        };
        println!(
            "{:>6}  {:48} {}",
            item.index,
            name,
            variant_labels(item, colors)
        );
    }

    println!();
    let footer = format!(
        "Total: {} items (limit: {}, offset: {})",
        output.total,
        args.limit.unwrap_or(ctx.config.search.default_limit),
        output.offset
    );
    if colors {
        println!("{}", footer.dimmed());
    } else {
        println!("{footer}");
    }
}
