//! Catalog search indexing
//!
//! Builds a per-category index over raw catalog items and answers free-text
//! queries against it.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                     Raw catalog items                          │
//! └────────────────────────────────────────────────────────────────┘
//!                                │
//!                                ▼
//!                ┌───────────────────────────────┐
//!                │  preprocess (normalize.rs,    │
//!                │  synonyms.rs, preprocess.rs)  │
//!                └───────────────────────────────┘
//!                                │  base items + match tokens
//!                                ▼
//!                ┌───────────────────────────────┐
//!                │  TokenPostings (inverted.rs)  │
//!                └───────────────────────────────┘
//!                                │
//!                                ▼
//!                ┌───────────────────────────────┐
//!                │  CategoryIndex (index.rs)     │◀──── query (query.rs)
//!                └───────────────────────────────┘
//! ```

pub mod index;
pub mod inverted;
pub mod normalize;
pub mod preprocess;
pub mod query;
pub mod synonyms;

pub use index::{CategoryIndex, IndexStats};
pub use inverted::TokenPostings;
pub use normalize::{BaseInfo, extract_base_info, normalize, tokenize};
pub use preprocess::{BaseItem, ItemMetadata, Preprocessed, get_variant, preprocess};
pub use query::{QueryWords, linear_search, matching_positions, search};
pub use synonyms::word_matches;
