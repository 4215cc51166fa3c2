//! Catalog preprocessing: raw items grouped into base items
//!
//! Raw items sharing `(base name, category, pattern)` collapse into one
//! [`BaseItem`] whose variant map holds the normal, StatTrak and Souvenir
//! entries. Base items keep first-seen order, so their positions are stable
//! across identical rebuilds.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::{CatalogKind, CategoryFields, DroppedItem, Rarity, RawItem, Variant};

use super::normalize::{extract_base_info, normalize, tokenize};
use super::synonyms::{expand_text, variant_words};

/// Display metadata extracted from a base item's first-seen raw item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemMetadata {
    Skin {
        weapon: Option<String>,
        category: Option<String>,
        pattern: Option<String>,
        min_float: Option<f64>,
        max_float: Option<f64>,
    },
    Sticker {
        tournament_event: Option<String>,
        tournament_team: Option<String>,
        sticker_type: Option<String>,
    },
    Generic {
        item_type: String,
    },
}

impl ItemMetadata {
    fn from_raw(kind: CatalogKind, item: &RawItem) -> Self {
        match (kind, &item.fields) {
            (
                CatalogKind::Skins,
                CategoryFields::Skin {
                    weapon,
                    min_float,
                    max_float,
                    ..
                },
            ) => Self::Skin {
                weapon: weapon.clone(),
                category: item.category.clone(),
                pattern: item.pattern.clone(),
                min_float: *min_float,
                max_float: *max_float,
            },
            (CatalogKind::Skins, _) => Self::Skin {
                weapon: None,
                category: item.category.clone(),
                pattern: item.pattern.clone(),
                min_float: None,
                max_float: None,
            },
            (
                CatalogKind::Stickers,
                CategoryFields::Sticker {
                    tournament_event,
                    tournament_team,
                    sticker_type,
                    ..
                },
            ) => Self::Sticker {
                tournament_event: tournament_event.clone(),
                tournament_team: tournament_team.clone(),
                sticker_type: sticker_type.clone(),
            },
            (CatalogKind::Stickers, _) => Self::Sticker {
                tournament_event: None,
                tournament_team: None,
                sticker_type: None,
            },
            (_, CategoryFields::Generic { item_type: Some(item_type) }) => Self::Generic {
                item_type: item_type.clone(),
            },
            _ => Self::Generic {
                item_type: kind.item_label().to_string(),
            },
        }
    }
}

/// A de-duplicated logical item, independent of variant.
#[derive(Debug, Clone, Serialize)]
pub struct BaseItem {
    /// Position in the category's base item array.
    pub index: usize,
    pub base_name: String,
    pub category: String,
    pub pattern: String,
    /// Image of the first-seen raw item.
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity: Option<Rarity>,
    pub metadata: ItemMetadata,
    pub variants: BTreeMap<Variant, RawItem>,
    /// Tokens of the normalized base name, category and pattern.
    pub tokens: BTreeSet<String>,
    /// `tokens` plus synonym and variant expansions; what queries match against.
    #[serde(skip)]
    pub match_tokens: BTreeSet<String>,
}

impl BaseItem {
    /// The raw item for a variant, if this base item has one.
    #[must_use]
    pub fn variant(&self, variant: Variant) -> Option<&RawItem> {
        self.variants.get(&variant)
    }

    #[must_use]
    pub fn has_variant(&self, variant: Variant) -> bool {
        self.variants.contains_key(&variant)
    }

    /// Variant tags present, in `normal`, `stattrak`, `souvenir` order.
    pub fn variant_tags(&self) -> impl Iterator<Item = Variant> + '_ {
        self.variants.keys().copied()
    }

    /// Number of raw items folded into this base item.
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }
}

/// Look up one variant of a base item.
#[must_use]
pub fn get_variant(item: &BaseItem, variant: Variant) -> Option<&RawItem> {
    item.variant(variant)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct BaseKey {
    base_name: String,
    category: String,
    pattern: String,
}

/// Output of [`preprocess`].
#[derive(Debug, Clone, Default)]
pub struct Preprocessed {
    pub items: Vec<BaseItem>,
    /// Raw items accepted into some base item.
    pub raw_items: usize,
    /// Raw items that replaced an earlier item at the same key and variant.
    pub overwritten: usize,
    /// Raw items rejected before grouping.
    pub dropped: Vec<DroppedItem>,
}

/// Group raw items into base items, in first-seen order.
///
/// A second raw item landing on an existing `(key, variant)` replaces the
/// earlier one (last write wins). Items with a blank name are dropped.
pub fn preprocess(kind: CatalogKind, category: &str, items: Vec<RawItem>) -> Preprocessed {
    let mut positions: HashMap<BaseKey, usize> = HashMap::with_capacity(items.len());
    let mut out = Preprocessed {
        items: Vec::new(),
        raw_items: 0,
        overwritten: 0,
        dropped: Vec::new(),
    };
    let mut search_texts: Vec<String> = Vec::new();

    for (position, item) in items.into_iter().enumerate() {
        if item.name.trim().is_empty() {
            warn!(category, position, "Dropping catalog item without a name");
            out.dropped.push(DroppedItem {
                position,
                reason: "missing `name`".to_string(),
            });
            continue;
        }

        let info = extract_base_info(&item);
        let key = BaseKey {
            base_name: info.base_name,
            category: info.category,
            pattern: info.pattern,
        };

        let index = match positions.get(&key) {
            Some(&index) => index,
            None => {
                let index = out.items.len();
                let search_text = [
                    normalize(&key.base_name),
                    normalize(&key.category),
                    normalize(&key.pattern),
                ]
                .join(" ");
                let tokens = tokenize(&search_text);

                out.items.push(BaseItem {
                    index,
                    base_name: key.base_name.clone(),
                    category: key.category.clone(),
                    pattern: key.pattern.clone(),
                    image: item.image.clone(),
                    rarity: item.rarity.clone(),
                    metadata: ItemMetadata::from_raw(kind, &item),
                    variants: BTreeMap::new(),
                    tokens,
                    match_tokens: BTreeSet::new(),
                });
                search_texts.push(search_text);
                positions.insert(key, index);
                index
            }
        };

        out.raw_items += 1;
        let base = &mut out.items[index];
        if let Some(previous) = base.variants.insert(info.variant, item) {
            out.overwritten += 1;
            debug!(
                category,
                base_name = %base.base_name,
                variant = %info.variant,
                replaced = %previous.name,
                "Duplicate variant replaced by later catalog entry"
            );
        }
    }

    for (base, search_text) in out.items.iter_mut().zip(&search_texts) {
        let mut match_tokens = base.tokens.clone();
        match_tokens.extend(expand_text(search_text));
        match_tokens.extend(variant_words(base.variants.keys().copied()));
        base.match_tokens = match_tokens;
    }

    debug!(
        category,
        base_items = out.items.len(),
        raw_items = out.raw_items,
        overwritten = out.overwritten,
        "Grouped catalog into base items"
    );
    out
}
