//! Catalog data model
//!
//! Raw per-category item catalogs as they arrive from their sources, before
//! any grouping or indexing.

pub mod kind;
pub mod raw;

pub use kind::{CatalogKind, DEFAULT_TYPE_ALIASES, Variant};
pub use raw::{CategoryFields, DroppedItem, ParsedCatalog, Rarity, RawItem, parse_payload, parse_values};
