//! Query engine
//!
//! A query is normalized and tokenized exactly like catalog text. A base item
//! matches when every query word matches at least one token of its match set
//! (see [`word_matches`]). Results come back in base item order; there is no
//! scoring.
//!
//! The indexed path walks the category vocabulary once per query word and
//! counts, per base item, how many query words it satisfied. The linear
//! predicate [`BaseItem::matches`] defines the same relation item by item and
//! is kept as the reference the indexed path must agree with.

use std::time::Instant;

use tracing::trace;

use super::index::CategoryIndex;
use super::inverted::TokenPostings;
use super::normalize::{normalize, split_tokens};
use super::preprocess::BaseItem;
use super::synonyms::word_matches;

/// The distinct words of a normalized query, in query order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryWords {
    words: Vec<String>,
}

impl QueryWords {
    /// Normalize and tokenize a free-text query.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let normalized = normalize(query);
        let mut words: Vec<String> = Vec::new();
        for token in split_tokens(&normalized) {
            if !words.iter().any(|w| w == token) {
                words.push(token.to_string());
            }
        }
        Self { words }
    }

    /// No usable words: the query matches everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.words
    }
}

impl BaseItem {
    /// Whether this base item satisfies every query word.
    #[must_use]
    pub fn matches(&self, query: &QueryWords) -> bool {
        query.words.iter().all(|q| {
            self.match_tokens
                .iter()
                .any(|t| word_matches(q, t))
        })
    }
}

/// Search a category index with free text.
///
/// An empty query (no word of two or more characters) returns every base
/// item; an empty category returns nothing.
pub fn search<'a>(index: &'a CategoryIndex, query: &str) -> Vec<&'a BaseItem> {
    let started = Instant::now();
    let words = QueryWords::parse(query);
    let results: Vec<&BaseItem> = matching_positions(index.postings(), index.len(), &words)
        .into_iter()
        .filter_map(|position| index.item(position))
        .collect();

    trace!(
        category = %index.name(),
        query,
        words = words.len(),
        results = results.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "Catalog search"
    );
    results
}

/// Reference search that checks every base item with [`BaseItem::matches`].
pub fn linear_search<'a>(items: &'a [BaseItem], query: &str) -> Vec<&'a BaseItem> {
    let words = QueryWords::parse(query);
    items.iter().filter(|item| item.matches(&words)).collect()
}

/// Positions of base items matching every query word, ascending.
pub fn matching_positions(
    postings: &TokenPostings,
    item_count: usize,
    words: &QueryWords,
) -> Vec<usize> {
    if words.is_empty() {
        return (0..item_count).collect();
    }

    let mut satisfied = vec![0usize; item_count];
    let mut last_word = vec![usize::MAX; item_count];

    for (word_index, word) in words.as_slice().iter().enumerate() {
        let mut any = false;
        for (token, positions) in postings.iter() {
            if !word_matches(word, token) {
                continue;
            }
            any = true;
            for &position in positions {
                if last_word[position] != word_index {
                    last_word[position] = word_index;
                    satisfied[position] += 1;
                }
            }
        }
        if !any {
            return Vec::new();
        }
    }

    satisfied
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count == words.len())
        .map(|(position, _)| position)
        .collect()
}
