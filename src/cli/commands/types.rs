//! cidx types - Loaded catalog types and aliases

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::app::AppContext;
use crate::catalog::CatalogKind;
use crate::cli::OutputFormat;
use crate::cli::output::{emit_jsonl, emit_tsv};
use crate::error::Result;

use super::{emit_data, print_load_warnings};

#[derive(Args, Debug)]
pub struct TypesArgs {}

#[derive(Serialize)]
struct TypeEntry<'a> {
    #[serde(rename = "type")]
    category: &'a str,
    kind: CatalogKind,
    items: usize,
    loaded: bool,
}

#[derive(Serialize)]
struct AliasEntry<'a> {
    alias: &'a str,
    target: &'a str,
}

#[derive(Serialize)]
struct TypesOutput<'a> {
    types: Vec<TypeEntry<'a>>,
    aliases: Vec<AliasEntry<'a>>,
}

pub fn run(ctx: &AppContext, _args: &TypesArgs) -> Result<()> {
    let report = ctx.store.load_report();
    let output = TypesOutput {
        types: ctx
            .store
            .indexes()
            .map(|index| TypeEntry {
                category: index.name(),
                kind: index.kind(),
                items: index.len(),
                loaded: report.failure_for(index.name()).is_none(),
            })
            .collect(),
        aliases: ctx
            .store
            .aliases()
            .iter()
            .map(|(alias, target)| AliasEntry { alias, target })
            .collect(),
    };

    match ctx.output_format {
        OutputFormat::Json => emit_data(ctx, &output),
        OutputFormat::Jsonl => emit_jsonl(&output.types),
        OutputFormat::Tsv => {
            emit_tsv(&["type", "kind", "items", "loaded"], &output.types, |t| {
                vec![
                    t.category.to_string(),
                    t.kind.to_string(),
                    t.items.to_string(),
                    t.loaded.to_string(),
                ]
            });
            Ok(())
        }
        OutputFormat::Human | OutputFormat::Plain => {
            types_human(ctx, &output);
            Ok(())
        }
    }
}

fn types_human(ctx: &AppContext, output: &TypesOutput<'_>) {
    let colors = ctx.output_format.use_colors();
    print_load_warnings(ctx);

    if output.types.is_empty() {
        println!("No catalog types configured. Add [catalog.sources] to cidx.toml or pass --source TYPE=SOURCE.");
        return;
    }

    for entry in &output.types {
        let status = if entry.loaded { "" } else { "  (failed)" };
        if colors {
            println!(
                "{:16} {:12} {:>7}{}",
                entry.category.bold(),
                entry.kind.as_str().dimmed(),
                entry.items,
                status.red()
            );
        } else {
            println!(
                "{:16} {:12} {:>7}{}",
                entry.category,
                entry.kind.as_str(),
                entry.items,
                status
            );
        }
    }

    if !output.aliases.is_empty() {
        println!();
        for alias in &output.aliases {
            println!("{} -> {}", alias.alias, alias.target);
        }
    }
}
