//! Inverted index: token → base item positions
//!
//! Built once per category over each base item's match set. Walking base
//! items in array order and visiting each distinct token once per item keeps
//! every postings list strictly ascending and duplicate-free.

use std::collections::BTreeMap;

use super::preprocess::BaseItem;

/// Token postings for one category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenPostings {
    postings: BTreeMap<String, Vec<usize>>,
}

impl TokenPostings {
    /// Build postings over the base items' match tokens.
    pub fn build(items: &[BaseItem]) -> Self {
        let mut postings: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for item in items {
            for token in &item.match_tokens {
                postings.entry(token.clone()).or_default().push(item.index);
            }
        }
        Self { postings }
    }

    /// Positions of base items containing `token`; empty when unknown.
    #[must_use]
    pub fn get(&self, token: &str) -> &[usize] {
        self.postings.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Known tokens, sorted.
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }

    /// `(token, positions)` pairs, sorted by token.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.postings.iter().map(|(t, p)| (t.as_str(), p.as_slice()))
    }

    /// Number of distinct tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Total number of postings entries across all tokens.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.postings.values().map(Vec::len).sum()
    }
}
