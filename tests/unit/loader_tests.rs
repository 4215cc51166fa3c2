use std::collections::BTreeMap;
use std::time::Duration;

use httpmock::prelude::*;

use cidx::config::{CatalogConfig, LoadConfig};
use cidx::error::ErrorCode;
use cidx::store::{LoadOutcome, load_catalogs, load_catalogs_blocking};
use cidx::test_utils::fixtures::{CASES_JSON, CatalogFixture};

fn catalog_config(sources: &[(&str, String)]) -> CatalogConfig {
    CatalogConfig {
        sources: sources
            .iter()
            .map(|(category, source)| ((*category).to_string(), source.clone()))
            .collect(),
        ..CatalogConfig::default()
    }
}

fn fast_load() -> LoadConfig {
    LoadConfig {
        timeout: Duration::from_secs(2),
        concurrency: 2,
        retries: 0,
        ..LoadConfig::default()
    }
}

#[test]
fn loads_files_and_inline_sources() {
    let fixture = CatalogFixture::new();
    let paths: BTreeMap<String, _> = fixture.write_samples().into_iter().collect();

    let catalog = catalog_config(&[
        ("skins", paths["skins"].display().to_string()),
        ("stickers", paths["stickers"].display().to_string()),
        ("cases", CASES_JSON.to_string()),
    ]);
    let store = load_catalogs_blocking(&catalog, &fast_load());

    assert!(store.load_report().is_complete());
    assert_eq!(store.get_items_for_type("skins").len(), 3);
    assert_eq!(store.get_items_for_type("stickers").len(), 2);
    assert_eq!(store.get_items_for_type("cases").len(), 3);
    assert_eq!(store.search("liquids", "printstream").len(), 1);
}

#[test]
fn missing_file_degrades_to_empty_category() {
    let fixture = CatalogFixture::new();
    let missing = fixture.root.join("nope.json");
    let catalog = catalog_config(&[
        ("agents", missing.display().to_string()),
        ("cases", CASES_JSON.to_string()),
    ]);

    let (pending, progress) = load_catalogs(&catalog, &fast_load());
    let events: Vec<_> = progress.iter().collect();
    let store = pending.wait();

    assert_eq!(events.len(), 2);
    assert_eq!(events.last().map(|e| e.completed), Some(2));
    assert_eq!(events.last().map(|e| e.loaded), Some(1));
    assert!(events.iter().all(|e| e.total == 2));

    let failed = events.iter().find(|e| e.category == "agents").unwrap();
    assert!(matches!(
        failed.outcome,
        LoadOutcome::Failed {
            code: ErrorCode::StorageReadError,
            ..
        }
    ));

    let report = store.load_report();
    assert_eq!((report.loaded, report.total), (1, 2));
    assert!(store.get_items_for_type("agents").is_empty());
    assert_eq!(store.get_items_for_type("cases").len(), 3);
}

#[test]
fn progress_counters_are_monotonic() {
    let catalog = catalog_config(&[
        ("cases", CASES_JSON.to_string()),
        ("keychains", "[]".to_string()),
        ("patches", "[{\"name\": \"Patch | Bloodhound\", \"image\": \"p\"}]".to_string()),
        ("graffiti", "not json".to_string()),
    ]);
    let (pending, progress) = load_catalogs(&catalog, &fast_load());
    let events: Vec<_> = progress.iter().collect();
    drop(pending.wait());

    let completed: Vec<usize> = events.iter().map(|e| e.completed).collect();
    assert_eq!(completed, vec![1, 2, 3, 4]);
    let loaded: Vec<usize> = events.iter().map(|e| e.loaded).collect();
    assert!(loaded.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(loaded.last(), Some(&3));
}

#[test]
fn no_sources_yields_empty_store() {
    let store = load_catalogs_blocking(&CatalogConfig::default(), &fast_load());
    assert_eq!(store.categories().count(), 0);
    assert!(store.load_report().is_complete());
}

#[test]
fn failing_remote_categories_leave_the_rest_loaded() {
    let server = MockServer::start();
    let skins = server.mock(|when, then| {
        when.method(GET).path("/skins.json");
        then.status(200).body(cidx::test_utils::fixtures::SKINS_JSON);
    });
    let agents = server.mock(|when, then| {
        when.method(GET).path("/agents.json");
        then.status(503);
    });
    server.mock(|when, then| {
        when.method(GET).path("/stickers.json");
        then.status(200).body("[]").delay(Duration::from_millis(1500));
    });

    let catalog = catalog_config(&[
        ("skins", server.url("/skins.json")),
        ("agents", server.url("/agents.json")),
        ("stickers", server.url("/stickers.json")),
        ("cases", CASES_JSON.to_string()),
    ]);
    let load = LoadConfig {
        timeout: Duration::from_millis(200),
        concurrency: 4,
        retries: 1,
        retry_base_delay_ms: 1,
        retry_max_delay_ms: 2,
    };
    let (pending, progress) = load_catalogs(&catalog, &load);
    let events: Vec<_> = progress.iter().collect();
    let store = pending.wait();

    assert_eq!(events.len(), 4);
    assert_eq!(events.last().map(|e| (e.completed, e.loaded)), Some((4, 2)));

    let report = store.load_report();
    assert_eq!((report.loaded, report.total), (2, 4));
    assert_eq!(
        report.failure_for("agents").map(|f| f.code),
        Some(ErrorCode::NetworkBadStatus)
    );
    assert_eq!(
        report.failure_for("stickers").map(|f| f.code),
        Some(ErrorCode::NetworkTimeout)
    );
    agents.assert_calls(2);
    skins.assert_calls(1);

    assert!(store.get_items_for_type("agents").is_empty());
    assert!(store.get_items_for_type("stickers").is_empty());
    assert_eq!(store.search("skins", "ak red").len(), 1);
    assert_eq!(store.get_items_for_type("cases").len(), 3);
}
