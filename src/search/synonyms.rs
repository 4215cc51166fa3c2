//! Fixed synonym and abbreviation table
//!
//! Expands a base item's indexed tokens with condition abbreviations, weapon
//! short names, pattern nicknames and variant words so that queries like
//! `ak red`, `fn` or `st` find the right items. The table is static: nothing
//! here is learned from catalog data.
//!
//! Every group is bidirectional. When any phrase of a group occurs in an
//! item's normalized text (on whitespace boundaries), the tokens of every
//! phrase in the group join the item's match set.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::catalog::Variant;

use super::normalize::split_tokens;

/// Synonym groups, written in normalized form.
const PHRASE_GROUPS: &[&[&str]] = &[
    // Conditions
    &["factory new", "fn"],
    &["minimal wear", "mw"],
    &["field-tested", "ft"],
    &["well-worn", "ww"],
    &["battle-scarred", "bs"],
    // Weapons
    &["ak-47", "ak", "ak47"],
    &["m4a4", "m4"],
    &["m4a1-s", "m4", "m4a1", "m4a1s"],
    &["awp"],
    &["usp-s", "usp", "usps"],
    &["glock-18", "glock"],
    // Patterns
    &["dragon lore", "dlore"],
    &["asiimov", "asii"],
    &["redline", "red line"],
    &["bloodsport", "blood sport"],
];

/// Words added to a base item's match set for each variant it carries.
const VARIANT_WORDS: &[(Variant, &[&str])] = &[
    (Variant::StatTrak, &["stattrak", "stat", "trak"]),
    (Variant::Souvenir, &["souvenir"]),
];

/// Two-letter query words that stand for longer candidate tokens.
const QUERY_ALIASES: &[(&str, &[&str])] = &[("st", &["stattrak", "stat"]), ("sv", &["souvenir"])];

struct PhraseGroup {
    /// Phrases padded with a leading and trailing space.
    padded: Vec<String>,
    tokens: BTreeSet<String>,
}

static GROUPS: LazyLock<Vec<PhraseGroup>> = LazyLock::new(|| {
    PHRASE_GROUPS
        .iter()
        .map(|phrases| PhraseGroup {
            padded: phrases.iter().map(|p| format!(" {p} ")).collect(),
            tokens: phrases
                .iter()
                .flat_map(|p| split_tokens(p))
                .map(str::to_string)
                .collect(),
        })
        .collect()
});

/// Synonym tokens implied by an item's normalized text.
///
/// `normalized` is the concatenation of the item's normalized name, category
/// and pattern.
#[must_use]
pub fn expand_text(normalized: &str) -> BTreeSet<String> {
    let padded = format!(" {normalized} ");
    let mut expanded = BTreeSet::new();
    for group in GROUPS.iter() {
        if group.padded.iter().any(|phrase| padded.contains(phrase.as_str())) {
            expanded.extend(group.tokens.iter().cloned());
        }
    }
    expanded
}

/// Words implied by the variants a base item carries.
pub fn variant_words(variants: impl IntoIterator<Item = Variant>) -> BTreeSet<String> {
    let mut words = BTreeSet::new();
    for variant in variants {
        if let Some((_, expansions)) = VARIANT_WORDS.iter().find(|(v, _)| *v == variant) {
            words.extend(expansions.iter().map(|w| (*w).to_string()));
        }
    }
    words
}

/// Whether a query word is an alias for a candidate token.
#[must_use]
pub fn is_query_alias(query_word: &str, token: &str) -> bool {
    QUERY_ALIASES
        .iter()
        .any(|(alias, targets)| *alias == query_word && targets.contains(&token))
}

/// Whether query word `q` matches candidate token `t`.
///
/// Holds on equality, on containment in either direction, or when `q` is a
/// query alias of `t`.
#[must_use]
pub fn word_matches(q: &str, t: &str) -> bool {
    q == t || t.contains(q) || q.contains(t) || is_query_alias(q, t)
}
