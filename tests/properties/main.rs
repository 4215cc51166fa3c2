//! Property tests over normalization, grouping and the inverted index.

use std::collections::{BTreeSet, HashMap};

use proptest::prelude::*;

use cidx::catalog::{CatalogKind, RawItem, Variant};
use cidx::search::{CategoryIndex, extract_base_info, linear_search, normalize, tokenize};

const NAMES: &[&str] = &[
    "AK-47 | Redline",
    "AWP | Dragon Lore",
    "M4A4 | Howl",
    "★ Butterfly Knife | Fade",
    "USP-S | Kill Confirmed",
    "Glock-18 | Bullet Queen",
];

fn arb_raw_item() -> impl Strategy<Value = RawItem> {
    (
        prop_oneof![Just(""), Just("StatTrak™ "), Just("Souvenir ")],
        prop::sample::select(NAMES),
        prop_oneof![Just(""), Just("Rifles"), Just("Knives")],
        prop_oneof![Just(""), Just("Redline"), Just("Fade")],
        "[a-z]{1,6}",
    )
        .prop_map(|(prefix, name, category, pattern, image)| {
            let mut item = RawItem::new(format!("{prefix}{name}"), image);
            if !category.is_empty() {
                item = item.with_category(category);
            }
            if !pattern.is_empty() {
                item = item.with_pattern(pattern);
            }
            item
        })
}

fn build(items: Vec<RawItem>) -> CategoryIndex {
    CategoryIndex::build("skins", CatalogKind::Skins, items)
}

proptest! {
    #[test]
    fn normalize_is_idempotent(text in ".{0,60}") {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn tokens_meet_minimum_length(text in "[a-zA-Z0-9 |★™-]{0,60}") {
        for token in tokenize(&normalize(&text)) {
            prop_assert!(token.chars().count() >= 2);
            prop_assert!(!token.contains(' ') && !token.contains('-'));
        }
    }

    #[test]
    fn grouping_follows_key_equality(items in prop::collection::vec(arb_raw_item(), 0..30)) {
        let keys: Vec<(String, String, String)> = items
            .iter()
            .map(|item| {
                let info = extract_base_info(item);
                (info.base_name, info.category, info.pattern)
            })
            .collect();
        let idx = build(items);

        let distinct: BTreeSet<_> = keys.iter().cloned().collect();
        prop_assert_eq!(idx.len(), distinct.len());

        let mut first_seen: HashMap<&(String, String, String), usize> = HashMap::new();
        for key in &keys {
            let next = first_seen.len();
            first_seen.entry(key).or_insert(next);
        }
        for (key, position) in first_seen {
            let item = &idx.items()[position];
            prop_assert_eq!(&item.base_name, &key.0);
            prop_assert_eq!(&item.category, &key.1);
            prop_assert_eq!(&item.pattern, &key.2);
        }
    }

    #[test]
    fn variants_hold_at_most_one_item_per_tag(items in prop::collection::vec(arb_raw_item(), 0..30)) {
        let raw_count = items.len();
        let idx = build(items);
        let held: usize = idx.items().iter().map(|item| item.variants.len()).sum();
        prop_assert_eq!(held + idx.stats().overwritten, raw_count);
        for item in idx.items() {
            prop_assert!(!item.variants.is_empty());
            prop_assert!(item.variants.keys().all(|v| Variant::ALL.contains(v)));
        }
    }

    #[test]
    fn postings_are_ascending_and_valid(items in prop::collection::vec(arb_raw_item(), 0..30)) {
        let idx = build(items);
        for (_, positions) in idx.postings().iter() {
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(positions.iter().all(|&p| p < idx.len()));
        }
    }

    #[test]
    fn rebuild_is_identical(items in prop::collection::vec(arb_raw_item(), 0..30)) {
        let first = build(items.clone());
        let second = build(items);
        let first_names: Vec<&String> = first.items().iter().map(|i| &i.base_name).collect();
        let second_names: Vec<&String> = second.items().iter().map(|i| &i.base_name).collect();
        prop_assert_eq!(first_names, second_names);
        prop_assert!(first.postings().iter().eq(second.postings().iter()));
    }

    #[test]
    fn indexed_search_equals_linear(
        items in prop::collection::vec(arb_raw_item(), 0..30),
        query in "[a-z★ |-]{0,12}",
    ) {
        let idx = build(items);
        let indexed: Vec<usize> = idx.search(&query).iter().map(|i| i.index).collect();
        let linear: Vec<usize> = linear_search(idx.items(), &query).iter().map(|i| i.index).collect();
        prop_assert_eq!(indexed, linear);
    }

    #[test]
    fn results_are_in_base_item_order(
        items in prop::collection::vec(arb_raw_item(), 0..30),
        query in "[a-z ]{0,8}",
    ) {
        let idx = build(items);
        let positions: Vec<usize> = idx.search(&query).iter().map(|i| i.index).collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
