//! cidx show - Show one base item with its variants

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::catalog::{RawItem, Variant};
use crate::cli::OutputFormat;
use crate::cli::output::{HumanLayout, emit_human, emit_jsonl, emit_tsv};
use crate::error::{CidxError, Result};
use crate::search::{BaseItem, CategoryIndex, ItemMetadata, get_variant};

use super::{emit_data, print_load_warnings};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Catalog type
    pub category: String,

    /// Item name; a StatTrak™/Souvenir prefix is ignored
    #[arg(required = true, num_args = 1..)]
    pub name: Vec<String>,

    /// Only show this variant (normal, stattrak, souvenir)
    #[arg(long)]
    pub variant: Option<Variant>,

    /// Include index tokens
    #[arg(long)]
    pub tokens: bool,
}

#[derive(Serialize)]
struct ShowOutput<'a> {
    #[serde(rename = "type")]
    category: &'a str,
    index: usize,
    name: &'a str,
    metadata: &'a ItemMetadata,
    variants: Vec<VariantEntry<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tokens: Option<Vec<TokenEntry<'a>>>,
}

#[derive(Debug, Serialize)]
struct VariantEntry<'a> {
    variant: Variant,
    #[serde(flatten)]
    item: &'a RawItem,
}

/// An indexed token and how many base items in the category share it.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct TokenEntry<'a> {
    token: &'a str,
    items: usize,
}

pub fn run(ctx: &AppContext, args: &ShowArgs) -> Result<()> {
    let index = ctx.store.require_index(&args.category)?;
    let name = args.name.join(" ");
    let item = index
        .find_by_name(&name)
        .ok_or_else(|| CidxError::ItemNotFound {
            category: index.name().to_string(),
            name: name.clone(),
        })?;

    let variants = selected_variants(item, args.variant, &name, index.name())?;
    let output = ShowOutput {
        category: index.name(),
        index: item.index,
        name: &item.base_name,
        metadata: &item.metadata,
        variants,
        tokens: args.tokens.then(|| token_entries(index, item)),
    };

    match ctx.output_format {
        OutputFormat::Json => emit_data(ctx, &output),
        OutputFormat::Jsonl => emit_jsonl(&output.variants),
        OutputFormat::Tsv => {
            emit_tsv(&["variant", "name", "image"], &output.variants, |entry| {
                vec![
                    entry.variant.to_string(),
                    entry.item.name.clone(),
                    entry.item.image.clone(),
                ]
            });
            Ok(())
        }
        OutputFormat::Human | OutputFormat::Plain => {
            show_human(ctx, item, &output);
            Ok(())
        }
    }
}

fn selected_variants<'a>(
    item: &'a BaseItem,
    wanted: Option<Variant>,
    name: &str,
    category: &str,
) -> Result<Vec<VariantEntry<'a>>> {
    match wanted {
        Some(variant) => {
            let raw = get_variant(item, variant).ok_or_else(|| CidxError::ItemNotFound {
                category: category.to_string(),
                name: format!("{name} ({variant})"),
            })?;
            Ok(vec![VariantEntry { variant, item: raw }])
        }
        None => Ok(item
            .variants
            .iter()
            .map(|(variant, raw)| VariantEntry {
                variant: *variant,
                item: raw,
            })
            .collect()),
    }
}

fn token_entries<'a>(index: &'a CategoryIndex, item: &'a BaseItem) -> Vec<TokenEntry<'a>> {
    item.tokens
        .iter()
        .map(|token| TokenEntry {
            token: token.as_str(),
            items: index.postings_for(token).len(),
        })
        .collect()
}

fn show_human(ctx: &AppContext, item: &BaseItem, output: &ShowOutput<'_>) {
    print_load_warnings(ctx);
    let mut layout = if ctx.output_format.use_colors() {
        HumanLayout::new()
    } else {
        HumanLayout::plain()
    };

    layout
        .title(&item.base_name)
        .kv("Type", output.category)
        .kv("Index", &item.index.to_string());
    if !item.category.is_empty() {
        layout.kv("Category", &item.category);
    }
    if !item.pattern.is_empty() {
        layout.kv("Pattern", &item.pattern);
    }
    if let Some(rarity) = &item.rarity {
        layout.kv("Rarity", &rarity.name);
    }
    metadata_lines(&mut layout, &item.metadata);

    layout.blank().section("Variants");
    for entry in &output.variants {
        layout.bullet(&format!("{:<9} {}", entry.variant.as_str(), entry.item.name));
        layout.push_line(format!("    image: {}", entry.item.image));
    }

    if let Some(tokens) = &output.tokens {
        let line: Vec<String> = tokens
            .iter()
            .map(|entry| format!("{} ({})", entry.token, entry.items))
            .collect();
        layout.blank().section("Tokens").push_line(line.join(" "));
    }
    emit_human(layout);
}

fn metadata_lines(layout: &mut HumanLayout, metadata: &ItemMetadata) {
    match metadata {
        ItemMetadata::Skin {
            weapon,
            min_float,
            max_float,
            ..
        } => {
            if let Some(weapon) = weapon {
                layout.kv("Weapon", weapon);
            }
            if let (Some(min), Some(max)) = (min_float, max_float) {
                layout.kv("Float", &format!("{min:.2} - {max:.2}"));
            }
        }
        ItemMetadata::Sticker {
            tournament_event,
            tournament_team,
            sticker_type,
        } => {
            if let Some(event) = tournament_event {
                layout.kv("Tournament", event);
            }
            if let Some(team) = tournament_team {
                layout.kv("Team", team);
            }
            if let Some(kind) = sticker_type {
                layout.kv("Sticker type", kind);
            }
        }
        ItemMetadata::Generic { item_type } => {
            layout.kv("Item type", item_type);
        }
    }
}
