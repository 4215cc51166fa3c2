//! Per-category index bundle

use serde::Serialize;
use tracing::debug;

use crate::catalog::{CatalogKind, ParsedCatalog, RawItem, parse_payload};
use crate::error::Result;

use super::inverted::TokenPostings;
use super::normalize::normalize;
use super::preprocess::{BaseItem, preprocess};
use super::query;

/// Size figures for one category index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub base_items: usize,
    pub raw_items: usize,
    pub dropped: usize,
    pub overwritten: usize,
    pub tokens: usize,
    pub postings_entries: usize,
}

/// Base items, inverted index and vocabulary of one catalog type.
///
/// Immutable once built.
#[derive(Debug, Clone)]
pub struct CategoryIndex {
    name: String,
    kind: CatalogKind,
    items: Vec<BaseItem>,
    postings: TokenPostings,
    stats: IndexStats,
}

impl CategoryIndex {
    /// An index with no items; every search on it returns nothing.
    pub fn empty(name: impl Into<String>, kind: CatalogKind) -> Self {
        Self {
            name: name.into(),
            kind,
            items: Vec::new(),
            postings: TokenPostings::default(),
            stats: IndexStats::default(),
        }
    }

    /// Build from raw items.
    pub fn build(name: impl Into<String>, kind: CatalogKind, items: Vec<RawItem>) -> Self {
        Self::from_parsed(
            name,
            kind,
            ParsedCatalog {
                items,
                dropped: Vec::new(),
            },
        )
    }

    /// Build from a parsed payload, carrying its dropped-item count forward.
    pub fn from_parsed(name: impl Into<String>, kind: CatalogKind, parsed: ParsedCatalog) -> Self {
        let name = name.into();
        let dropped_before = parsed.dropped.len();
        let grouped = preprocess(kind, &name, parsed.items);
        let postings = TokenPostings::build(&grouped.items);

        let stats = IndexStats {
            base_items: grouped.items.len(),
            raw_items: grouped.raw_items,
            dropped: dropped_before + grouped.dropped.len(),
            overwritten: grouped.overwritten,
            tokens: postings.len(),
            postings_entries: postings.entry_count(),
        };
        debug!(
            category = %name,
            base_items = stats.base_items,
            tokens = stats.tokens,
            postings = stats.postings_entries,
            "Built category index"
        );

        Self {
            name,
            kind,
            items: grouped.items,
            postings,
            stats,
        }
    }

    /// Parse a JSON payload and build.
    pub fn from_json(name: impl Into<String>, kind: CatalogKind, json: &str) -> Result<Self> {
        let name = name.into();
        let parsed = parse_payload(kind, &name, json)?;
        Ok(Self::from_parsed(name, kind, parsed))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> CatalogKind {
        self.kind
    }

    /// Base items in first-seen order.
    #[must_use]
    pub fn items(&self) -> &[BaseItem] {
        &self.items
    }

    #[must_use]
    pub fn item(&self, position: usize) -> Option<&BaseItem> {
        self.items.get(position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn postings(&self) -> &TokenPostings {
        &self.postings
    }

    /// Base item positions containing `token`.
    #[must_use]
    pub fn postings_for(&self, token: &str) -> &[usize] {
        self.postings.get(token)
    }

    /// Known tokens, sorted.
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.postings.vocabulary()
    }

    #[must_use]
    pub const fn stats(&self) -> IndexStats {
        self.stats
    }

    /// Free-text search, results in base item order.
    pub fn search(&self, query: &str) -> Vec<&BaseItem> {
        query::search(self, query)
    }

    /// Like [`CategoryIndex::search`], truncated to `limit` results.
    pub fn search_limit(&self, query: &str, limit: usize) -> Vec<&BaseItem> {
        let mut results = self.search(query);
        results.truncate(limit);
        results
    }

    /// Find a base item by name, ignoring case, glyphs and variant prefix.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&BaseItem> {
        let wanted = normalize(name);
        self.find_normalized(&wanted).or_else(|| {
            let stripped = wanted
                .strip_prefix("stattrak ")
                .or_else(|| wanted.strip_prefix("souvenir "))?;
            self.find_normalized(stripped)
        })
    }

    fn find_normalized(&self, wanted: &str) -> Option<&BaseItem> {
        self.items
            .iter()
            .find(|item| normalize(&item.base_name) == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Variant;

    #[test]
    fn from_json_counts_dropped_items() {
        let json = r#"[
            {"name": "AK-47 | Redline", "image": "a", "pattern": "Redline"},
            {"image": "orphan"},
            {"name": "StatTrak™ AK-47 | Redline", "image": "b", "pattern": "Redline"}
        ]"#;
        let idx = CategoryIndex::from_json("skins", CatalogKind::Skins, json).unwrap();

        let stats = idx.stats();
        assert_eq!(stats.base_items, 1);
        assert_eq!(stats.raw_items, 2);
        assert_eq!(stats.dropped, 1);
        assert!(idx.items()[0].has_variant(Variant::StatTrak));
    }

    #[test]
    fn find_by_name_ignores_prefix_and_case() {
        let idx = CategoryIndex::build(
            "skins",
            CatalogKind::Skins,
            vec![RawItem::new("AK-47 | Redline", "a")],
        );
        assert!(idx.find_by_name("stattrak™ ak-47 | redline").is_some());
        assert!(idx.find_by_name("AK-47 | Vulcan").is_none());
    }

    #[test]
    fn search_limit_truncates_without_reordering() {
        let idx = CategoryIndex::build(
            "cases",
            CatalogKind::Cases,
            vec![
                RawItem::new("Gamma Case", "a"),
                RawItem::new("Gamma 2 Case", "b"),
                RawItem::new("Chroma Case", "c"),
            ],
        );
        let limited = idx.search_limit("case", 2);
        let names: Vec<&str> = limited.iter().map(|i| i.base_name.as_str()).collect();
        assert_eq!(names, vec!["Gamma Case", "Gamma 2 Case"]);
    }

    #[test]
    fn empty_index_reports_zero_stats() {
        let idx = CategoryIndex::empty("patches", CatalogKind::Patches);
        assert!(idx.is_empty());
        assert_eq!(idx.stats(), IndexStats::default());
        assert_eq!(idx.vocabulary().count(), 0);
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;
        use crate::search::linear_search;
        use crate::test_utils::arbitrary::{arb_query, arb_skins};

        proptest! {
            #[test]
            fn indexed_search_matches_linear_scan(items in arb_skins(40), query in arb_query()) {
                let idx = CategoryIndex::build("skins", CatalogKind::Skins, items);
                let indexed: Vec<usize> = idx.search(&query).iter().map(|i| i.index).collect();
                let linear: Vec<usize> =
                    linear_search(idx.items(), &query).iter().map(|i| i.index).collect();
                prop_assert_eq!(indexed, linear);
            }

            #[test]
            fn rebuild_is_deterministic(items in arb_skins(30)) {
                let first = CategoryIndex::build("skins", CatalogKind::Skins, items.clone());
                let second = CategoryIndex::build("skins", CatalogKind::Skins, items);
                prop_assert_eq!(first.stats(), second.stats());
                prop_assert!(first.vocabulary().eq(second.vocabulary()));
            }
        }
    }
}
