//! Text normalization and tokenization
//!
//! The same functions run over catalog text at index time and over user
//! queries at search time; any asymmetry between the two would make items
//! unfindable.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::catalog::{RawItem, Variant};

/// Tokens shorter than this (in characters) are discarded.
pub const MIN_TOKEN_CHARS: usize = 2;

/// Name prefix carried by StatTrak variants.
pub const STATTRAK_PREFIX: &str = "StatTrak™ ";

/// Name prefix carried by Souvenir variants.
pub const SOUVENIR_PREFIX: &str = "Souvenir ";

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s-]").unwrap());

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalize text for indexing or querying.
///
/// Lower-cases, spells out `★` as `star`, turns `|` into a space, strips
/// everything that is not a word character, whitespace or `-`, collapses
/// whitespace runs and trims. Idempotent.
#[must_use]
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase().replace('★', "star").replace('|', " ");
    let stripped = NON_WORD.replace_all(&lowered, "");
    WHITESPACE_RUN.replace_all(&stripped, " ").trim().to_string()
}

/// Split normalized text into its distinct tokens.
///
/// Splits on whitespace and hyphen runs and drops tokens shorter than
/// [`MIN_TOKEN_CHARS`].
#[must_use]
pub fn tokenize(normalized: &str) -> BTreeSet<String> {
    split_tokens(normalized).map(str::to_string).collect()
}

/// Token iterator in text order, duplicates included.
pub(crate) fn split_tokens(normalized: &str) -> impl Iterator<Item = &str> {
    normalized
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
}

/// The grouping key parts and variant of a raw item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BaseInfo {
    pub base_name: String,
    pub variant: Variant,
    pub category: String,
    pub pattern: String,
}

/// Derive base name, variant, category and pattern from a raw item.
///
/// The StatTrak prefix is checked before the Souvenir prefix; a name carrying
/// neither is the normal variant and is kept unchanged.
#[must_use]
pub fn extract_base_info(item: &RawItem) -> BaseInfo {
    let (base_name, variant) = split_variant_prefix(&item.name);
    BaseInfo {
        base_name: base_name.to_string(),
        variant,
        category: item.category_label().to_string(),
        pattern: item.pattern_label().to_string(),
    }
}

/// Strip a variant prefix from an item name.
#[must_use]
pub fn split_variant_prefix(name: &str) -> (&str, Variant) {
    if let Some(rest) = name.strip_prefix(STATTRAK_PREFIX) {
        (rest, Variant::StatTrak)
    } else if let Some(rest) = name.strip_prefix(SOUVENIR_PREFIX) {
        (rest, Variant::Souvenir)
    } else {
        (name, Variant::Normal)
    }
}
