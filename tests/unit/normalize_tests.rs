use cidx::catalog::{RawItem, Variant};
use cidx::search::{extract_base_info, normalize, tokenize};
use cidx::test_utils::{TestCase, run_table_tests};

#[test]
fn normalize_table() {
    let cases = vec![
        TestCase {
            name: "pipe and case",
            input: "AK-47 | Redline",
            expected: "ak-47 redline".to_string(),
        },
        TestCase {
            name: "star glyph",
            input: "★ Karambit | Fade",
            expected: "star karambit fade".to_string(),
        },
        TestCase {
            name: "trademark stripped",
            input: "StatTrak™ USP-S | Kill Confirmed",
            expected: "stattrak usp-s kill confirmed".to_string(),
        },
        TestCase {
            name: "punctuation and whitespace",
            input: "  Sticker |  Crown (Foil)  ",
            expected: "sticker crown foil".to_string(),
        },
        TestCase {
            name: "empty",
            input: "",
            expected: String::new(),
        },
    ];
    run_table_tests(cases, |input| normalize(input));
}

#[test]
fn tokenize_drops_short_tokens_and_splits_hyphens() {
    let tokens = tokenize(&normalize("M4A1-S | X-Ray (Factory New)"));
    let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();
    assert_eq!(tokens, vec!["factory", "m4a1", "new", "ray"]);
}

#[test]
fn base_info_prefix_precedence() {
    let cases = vec![
        TestCase {
            name: "stattrak",
            input: "StatTrak™ AWP | Asiimov",
            expected: ("AWP | Asiimov".to_string(), Variant::StatTrak),
        },
        TestCase {
            name: "souvenir",
            input: "Souvenir AWP | Dragon Lore",
            expected: ("AWP | Dragon Lore".to_string(), Variant::Souvenir),
        },
        TestCase {
            name: "stattrak before souvenir",
            input: "StatTrak™ Souvenir Glock-18",
            expected: ("Souvenir Glock-18".to_string(), Variant::StatTrak),
        },
        TestCase {
            name: "prefix must lead",
            input: "AWP | Souvenir Print",
            expected: ("AWP | Souvenir Print".to_string(), Variant::Normal),
        },
    ];
    run_table_tests(cases, |input| {
        let info = extract_base_info(&RawItem::new(*input, "img"));
        (info.base_name, info.variant)
    });
}
