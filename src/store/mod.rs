//! Category index store
//!
//! Holds one [`CategoryIndex`] per loaded catalog type and resolves requested
//! type names through an alias table. Built once (see [`load_catalogs`] or
//! [`CategoryIndexStore::from_payloads`]), immutable afterwards, and safe to
//! share across threads by reference or `Arc`.

pub mod loader;
pub mod source;

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::catalog::{CatalogKind, DEFAULT_TYPE_ALIASES};
use crate::error::{CidxError, Result};
use crate::search::{BaseItem, CategoryIndex};

pub use loader::{
    CategoryFailure, LoadOutcome, LoadProgress, LoadReport, PendingStore, load_catalogs,
    load_catalogs_blocking,
};
pub use source::{CatalogSource, RetryPolicy};

pub use crate::search::get_variant;

/// Per-type search indexes with alias resolution.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndexStore {
    indexes: BTreeMap<String, CategoryIndex>,
    aliases: BTreeMap<String, String>,
    report: LoadReport,
}

impl CategoryIndexStore {
    /// Store over already-built indexes.
    pub fn from_indexes(
        indexes: impl IntoIterator<Item = CategoryIndex>,
        aliases: BTreeMap<String, String>,
    ) -> Self {
        let indexes: BTreeMap<String, CategoryIndex> = indexes
            .into_iter()
            .map(|index| (fold_type(index.name()), index))
            .collect();
        let total = indexes.len();
        Self {
            indexes,
            aliases: aliases
                .into_iter()
                .map(|(alias, target)| (fold_type(&alias), fold_type(&target)))
                .collect(),
            report: LoadReport {
                loaded: total,
                total,
                failures: Vec::new(),
            },
        }
    }

    /// Build synchronously from in-memory JSON payloads, keyed by type name.
    ///
    /// A payload that is not a JSON array leaves its category empty and is
    /// recorded in the load report. Uses the default alias table.
    pub fn from_payloads<K, V>(payloads: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut indexes = Vec::new();
        let mut failures = Vec::new();
        for (name, json) in dedupe_by_type(payloads) {
            let kind = CatalogKind::from_type_name(&name);
            match CategoryIndex::from_json(name.clone(), kind, json.as_ref()) {
                Ok(index) => indexes.push(index),
                Err(error) => {
                    warn!(category = %name, error = %error, "Category payload rejected");
                    failures.push(CategoryFailure::new(&name, "<payload>", &error));
                    indexes.push(CategoryIndex::empty(name, kind));
                }
            }
        }

        let total = indexes.len();
        let report = LoadReport {
            loaded: total - failures.len(),
            total,
            failures,
        };
        info!(loaded = report.loaded, total = report.total, "Built category store");
        Self::from_indexes(indexes, default_aliases()).with_report(report)
    }

    #[must_use]
    pub fn with_report(mut self, report: LoadReport) -> Self {
        self.report = report;
        self
    }

    /// Canonical category name for a requested type: case-folded, trimmed,
    /// then one alias hop.
    #[must_use]
    pub fn resolve_type(&self, requested: &str) -> String {
        let folded = fold_type(requested);
        match self.aliases.get(&folded) {
            Some(target) => target.clone(),
            None => folded,
        }
    }

    #[must_use]
    pub fn get_index_for_type(&self, requested: &str) -> Option<&CategoryIndex> {
        self.indexes.get(&self.resolve_type(requested))
    }

    /// Like [`CategoryIndexStore::get_index_for_type`], with a suggestion-bearing
    /// error for unknown types.
    pub fn require_index(&self, requested: &str) -> Result<&CategoryIndex> {
        if self.indexes.is_empty() {
            return Err(CidxError::NoCatalogs);
        }
        self.get_index_for_type(requested)
            .ok_or_else(|| CidxError::CategoryNotFound {
                requested: requested.to_string(),
                known: self.known_types(),
            })
    }

    /// Base items of a type; empty for unknown types.
    #[must_use]
    pub fn get_items_for_type(&self, requested: &str) -> &[BaseItem] {
        self.get_index_for_type(requested)
            .map(CategoryIndex::items)
            .unwrap_or(&[])
    }

    /// Search one type. Unknown types behave as empty categories.
    #[must_use]
    pub fn search(&self, requested: &str, query: &str) -> Vec<&BaseItem> {
        self.get_index_for_type(requested)
            .map(|index| index.search(query))
            .unwrap_or_default()
    }

    /// Loaded category names, sorted.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.indexes.keys().map(String::as_str)
    }

    pub fn indexes(&self) -> impl Iterator<Item = &CategoryIndex> {
        self.indexes.values()
    }

    #[must_use]
    pub const fn aliases(&self) -> &BTreeMap<String, String> {
        &self.aliases
    }

    #[must_use]
    pub const fn load_report(&self) -> &LoadReport {
        &self.report
    }

    /// Category names plus alias names, for suggestions.
    fn known_types(&self) -> Vec<String> {
        self.categories()
            .map(str::to_string)
            .chain(self.aliases.keys().cloned())
            .collect()
    }
}

fn fold_type(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Key entries by folded type name. A later entry for the same type replaces
/// the earlier one.
pub(crate) fn dedupe_by_type<K, V>(
    entries: impl IntoIterator<Item = (K, V)>,
) -> BTreeMap<String, V>
where
    K: AsRef<str>,
{
    let mut deduped = BTreeMap::new();
    for (name, value) in entries {
        let folded = fold_type(name.as_ref());
        if deduped.insert(folded.clone(), value).is_some() {
            warn!(
                category = %folded,
                requested = name.as_ref(),
                "Duplicate source for category; the later one wins"
            );
        }
    }
    deduped
}

fn default_aliases() -> BTreeMap<String, String> {
    DEFAULT_TYPE_ALIASES
        .iter()
        .map(|(alias, target)| ((*alias).to_string(), (*target).to_string()))
        .collect()
}
