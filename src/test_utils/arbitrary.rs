use proptest::prelude::*;

use crate::catalog::RawItem;

const WEAPONS: &[&str] = &["AK-47", "AWP", "M4A1-S", "M4A4", "USP-S", "Glock-18", "★ Karambit"];
const PATTERNS: &[&str] = &["Redline", "Dragon Lore", "Asiimov", "Fade", "Printstream", "Vulcan"];
const CATEGORIES: &[&str] = &["Rifles", "Sniper Rifles", "Pistols", "Knives"];

fn arb_prefix() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        4 => Just(""),
        1 => Just("StatTrak™ "),
        1 => Just("Souvenir "),
    ]
}

/// Skin-shaped raw items drawn from a small vocabulary, so groups and
/// synonym hits are common.
pub fn arb_skin() -> impl Strategy<Value = RawItem> {
    (
        arb_prefix(),
        prop::sample::select(WEAPONS),
        prop::sample::select(PATTERNS),
        prop::sample::select(CATEGORIES),
        "[a-z]{1,8}",
    )
        .prop_map(|(prefix, weapon, pattern, category, image)| {
            RawItem::new(format!("{prefix}{weapon} | {pattern}"), image)
                .with_category(category)
                .with_pattern(pattern)
        })
}

pub fn arb_skins(max: usize) -> impl Strategy<Value = Vec<RawItem>> {
    prop::collection::vec(arb_skin(), 0..max)
}

/// Free-text queries mixing catalog words, abbreviations and noise.
pub fn arb_query() -> impl Strategy<Value = String> {
    let word = prop_oneof![
        Just("ak".to_string()),
        Just("red".to_string()),
        Just("st".to_string()),
        Just("sv".to_string()),
        Just("dlore".to_string()),
        Just("m4".to_string()),
        Just("rifles".to_string()),
        Just("★".to_string()),
        "[a-z]{1,6}",
    ];
    prop::collection::vec(word, 0..4).prop_map(|words| words.join(" "))
}
