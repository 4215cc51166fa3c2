use cidx::catalog::{CatalogKind, RawItem, Variant};
use cidx::search::{CategoryIndex, get_variant, linear_search};
use cidx::test_utils::fixtures::skins_index;
use cidx::test_utils::logging::TestLogger;

fn names<'a>(results: &[&'a cidx::search::BaseItem]) -> Vec<&'a str> {
    results.iter().map(|item| item.base_name.as_str()).collect()
}

#[test]
fn stattrak_and_normal_share_one_base_item() {
    let log = TestLogger::new("stattrak_and_normal_share_one_base_item");
    let idx = CategoryIndex::build(
        "skins",
        CatalogKind::Skins,
        vec![
            RawItem::new("StatTrak™ AK-47 | Redline", "st.png")
                .with_category("Rifles")
                .with_pattern("Redline"),
            RawItem::new("AK-47 | Redline", "n.png")
                .with_category("Rifles")
                .with_pattern("Redline"),
        ],
    );
    log.log_value("items", &idx.len());

    assert_eq!(idx.len(), 1);
    let item = &idx.items()[0];
    assert_eq!(item.base_name, "AK-47 | Redline");
    assert_eq!(
        item.variant_tags().collect::<Vec<_>>(),
        vec![Variant::Normal, Variant::StatTrak]
    );
    assert_eq!(get_variant(item, Variant::StatTrak).map(|r| r.image.as_str()), Some("st.png"));
    assert!(get_variant(item, Variant::Souvenir).is_none());
    log.pass();
}

#[test]
fn abbreviation_and_substring_match() {
    let log = TestLogger::new("abbreviation_and_substring_match");
    let idx = skins_index();

    log.log_query("skins", "ak red");
    let results = idx.search("ak red");
    log.log_results(&results);

    assert_eq!(names(&results), vec!["AK-47 | Redline"]);
    log.pass();
}

#[test]
fn st_alias_finds_stattrak_item() {
    let idx = skins_index();
    let results = idx.search("st ak");
    assert_eq!(names(&results), vec!["AK-47 | Redline"]);

    // The AWP only has normal and Souvenir variants.
    assert!(idx.search("st awp").is_empty());
    assert_eq!(names(&idx.search("sv awp")), vec!["AWP | Dragon Lore"]);
}

#[test]
fn empty_category_matches_nothing() {
    let idx = CategoryIndex::empty("agents", CatalogKind::Agents);
    for query in ["", "a", "ak red", "★"] {
        assert!(idx.search(query).is_empty(), "{query:?}");
    }
}

#[test]
fn short_query_returns_everything_in_order() {
    let idx = skins_index();
    let all = names(&idx.search("a"));
    assert_eq!(
        all,
        vec!["AK-47 | Redline", "AWP | Dragon Lore", "M4A1-S | Printstream"]
    );
    assert_eq!(idx.search("").len(), idx.len());
    assert_eq!(idx.search("  | ").len(), idx.len());
}

#[test]
fn condition_and_pattern_synonyms() {
    let idx = CategoryIndex::build(
        "skins",
        CatalogKind::Skins,
        vec![
            RawItem::new("AWP | Dragon Lore (Factory New)", "a").with_pattern("Dragon Lore"),
            RawItem::new("Glock-18 | Fade (Minimal Wear)", "b").with_pattern("Fade"),
        ],
    );
    assert_eq!(names(&idx.search("dlore fn")), vec!["AWP | Dragon Lore (Factory New)"]);
    assert_eq!(names(&idx.search("glock mw")), vec!["Glock-18 | Fade (Minimal Wear)"]);
    assert!(idx.search("dlore mw").is_empty());
}

#[test]
fn results_follow_first_seen_order() {
    let idx = CategoryIndex::build(
        "skins",
        CatalogKind::Skins,
        vec![
            RawItem::new("M4A4 | Howl", "a"),
            RawItem::new("M4A1-S | Hyper Beast", "b"),
            RawItem::new("StatTrak™ M4A4 | Howl", "c"),
        ],
    );
    assert_eq!(
        names(&idx.search("m4")),
        vec!["M4A4 | Howl", "M4A1-S | Hyper Beast"]
    );
    assert_eq!(names(&idx.search("m4 stat")), vec!["M4A4 | Howl"]);
}

#[test]
fn indexed_and_linear_agree_on_fixture() {
    let idx = skins_index();
    for query in ["ak", "rifles", "red line", "st", "sv", "dragon", "zzz", "m4a1s", "★ a"] {
        let indexed: Vec<usize> = idx.search(query).iter().map(|i| i.index).collect();
        let linear: Vec<usize> = linear_search(idx.items(), query)
            .iter()
            .map(|i| i.index)
            .collect();
        assert_eq!(indexed, linear, "query {query:?}");
    }
}

#[test]
fn duplicate_variant_last_write_wins() {
    let idx = CategoryIndex::build(
        "skins",
        CatalogKind::Skins,
        vec![
            RawItem::new("AK-47 | Redline", "first"),
            RawItem::new("AK-47 | Redline", "second"),
        ],
    );
    assert_eq!(idx.len(), 1);
    assert_eq!(idx.stats().overwritten, 1);
    assert_eq!(
        get_variant(&idx.items()[0], Variant::Normal).map(|r| r.image.as_str()),
        Some("second")
    );
}

#[test]
fn different_pattern_means_different_base_item() {
    let idx = CategoryIndex::build(
        "skins",
        CatalogKind::Skins,
        vec![
            RawItem::new("★ Karambit | Doppler", "a").with_pattern("Phase 1"),
            RawItem::new("★ Karambit | Doppler", "b").with_pattern("Phase 2"),
        ],
    );
    assert_eq!(idx.len(), 2);
    assert_eq!(idx.items()[1].pattern, "Phase 2");
    assert_eq!(idx.search("star karambit").len(), 2);
}

#[test]
fn longer_query_word_can_widen_results() {
    let idx = CategoryIndex::build(
        "skins",
        CatalogKind::Skins,
        vec![
            RawItem::new("AK-47 | Redline", "ak.png").with_pattern("Redline"),
            RawItem::new("Sticker | Lines", "lines.png"),
        ],
    );

    // "re" is contained in "redline" only; "redlines" also contains the
    // token "lines", so typing on picks up the second item.
    assert_eq!(names(&idx.search("re")), vec!["AK-47 | Redline"]);
    assert_eq!(
        names(&idx.search("redlines")),
        vec!["AK-47 | Redline", "Sticker | Lines"]
    );
    assert_eq!(
        names(&linear_search(idx.items(), "redlines")),
        names(&idx.search("redlines"))
    );
}
