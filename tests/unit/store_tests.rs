use std::sync::Arc;

use cidx::catalog::Variant;
use cidx::error::ErrorCode;
use cidx::store::{CategoryIndexStore, get_variant};
use cidx::test_utils::fixtures::{CASES_JSON, SKINS_JSON, sample_store};

#[test]
fn liquids_alias_resolves_to_skins() {
    let store = sample_store();
    assert_eq!(store.resolve_type("Liquids"), "skins");
    assert_eq!(
        store.get_items_for_type("liquids").len(),
        store.get_items_for_type("skins").len()
    );
    assert_eq!(store.search("liquids", "ak red").len(), 1);
}

#[test]
fn unknown_type_is_empty_not_an_error() {
    let store = sample_store();
    assert!(store.get_items_for_type("gloves").is_empty());
    assert!(store.search("gloves", "").is_empty());
    assert!(store.get_index_for_type("gloves").is_none());

    let err = store.require_index("gloves").unwrap_err();
    assert_eq!(err.code(), ErrorCode::CategoryNotFound);
}

#[test]
fn sample_store_reports_complete_load() {
    let store = sample_store();
    let report = store.load_report();
    assert!(report.is_complete());
    assert_eq!((report.loaded, report.total), (3, 3));
    assert_eq!(
        store.categories().collect::<Vec<_>>(),
        vec!["cases", "skins", "stickers"]
    );
}

#[test]
fn malformed_payload_leaves_other_categories_intact() {
    let store = CategoryIndexStore::from_payloads([
        ("skins", SKINS_JSON),
        ("cases", CASES_JSON),
        ("agents", r#"{"error": "rate limited"}"#),
    ]);
    let report = store.load_report();
    assert_eq!((report.loaded, report.total), (2, 3));
    let failure = report.failure_for("agents").unwrap();
    assert_eq!(failure.code, ErrorCode::MalformedPayload);

    assert!(store.get_items_for_type("agents").is_empty());
    assert_eq!(store.get_items_for_type("cases").len(), 3);
}

#[test]
fn sticker_and_case_metadata() {
    let store = sample_store();
    let stickers = store.search("stickers", "katowice");
    assert_eq!(stickers.len(), 1);
    let value = serde_json::to_value(&stickers[0].metadata).unwrap();
    assert_eq!(value["kind"], "sticker");
    assert_eq!(value["tournament_event"], "Katowice 2014");
    assert_eq!(value["tournament_team"], "Natus Vincere");

    let cases = store.get_items_for_type("cases");
    let kilowatt = serde_json::to_value(&cases[2].metadata).unwrap();
    assert_eq!(kilowatt["item_type"], "Case");
}

#[test]
fn get_variant_through_store() {
    let store = sample_store();
    let awp = &store.search("skins", "dragon lore")[0];
    assert_eq!(
        get_variant(awp, Variant::Souvenir).map(|r| r.image.as_str()),
        Some("awp-sv.png")
    );
    assert!(get_variant(awp, Variant::StatTrak).is_none());
}

#[test]
fn store_is_shareable_across_threads() {
    let store = Arc::new(sample_store());
    let handles: Vec<_> = ["ak", "awp", "m4", "case"]
        .into_iter()
        .map(|query| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                store.search("skins", query).len() + store.search("cases", query).len()
            })
        })
        .collect();
    let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(counts, vec![1, 1, 1, 3]);
}
