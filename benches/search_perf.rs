//! Criterion benchmarks for index build and per-keystroke search.
//!
//! Performance targets:
//! - index_build: < 250ms for 12k raw items
//! - keystroke_search: < 5ms per query on the same catalog

use std::hint::black_box;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use cidx::catalog::{CatalogKind, RawItem};
use cidx::search::{CategoryIndex, linear_search};

const WEAPONS: &[&str] = &[
    "AK-47", "AWP", "M4A4", "M4A1-S", "USP-S", "Glock-18", "Desert Eagle", "P250", "MP9",
    "FAMAS", "Galil AR", "SSG 08", "★ Karambit", "★ Butterfly Knife",
];
const PATTERNS: &[&str] = &[
    "Redline", "Asiimov", "Dragon Lore", "Fade", "Doppler", "Hyper Beast", "Printstream",
    "Bloodsport", "Vulcan", "Neo-Noir", "Slaughter", "Case Hardened", "Crimson Web",
];
const CONDITIONS: &[&str] = &[
    "Factory New", "Minimal Wear", "Field-Tested", "Well-Worn", "Battle-Scarred",
];

/// Synthetic skins catalog: every weapon/pattern/condition combination,
/// repeated with collection suffixes until `target` raw items exist, a third
/// of them StatTrak.
fn synthetic_catalog(target: usize) -> Vec<RawItem> {
    let mut items = Vec::with_capacity(target);
    let mut collection = 0usize;
    while items.len() < target {
        for weapon in WEAPONS {
            for pattern in PATTERNS {
                for condition in CONDITIONS {
                    if items.len() >= target {
                        return items;
                    }
                    let prefix = if items.len() % 3 == 0 { "StatTrak™ " } else { "" };
                    items.push(
                        RawItem::new(
                            format!("{prefix}{weapon} | {pattern} ({condition})"),
                            format!("img-{}.png", items.len()),
                        )
                        .with_category(format!("Collection {collection}"))
                        .with_pattern(*pattern),
                    );
                }
            }
        }
        collection += 1;
    }
    items
}

// =============================================================================
// Index Build Benchmarks
// =============================================================================

fn index_build_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");
    group.sample_size(20);

    for size in [1_000usize, 12_000] {
        let items = synthetic_catalog(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("raw_items", size), &items, |b, items| {
            b.iter(|| CategoryIndex::build("skins", CatalogKind::Skins, black_box(items.clone())))
        });
    }

    group.finish();
}

// =============================================================================
// Search Benchmarks
// =============================================================================

fn keystroke_search_benchmarks(c: &mut Criterion) {
    let index = CategoryIndex::build("skins", CatalogKind::Skins, synthetic_catalog(12_000));

    // Successive prefixes of one typed query.
    let typed = "st ak red fn";
    let prefixes: Vec<&str> = (1..=typed.len()).map(|end| &typed[..end]).collect();

    let mut group = c.benchmark_group("keystroke_search");
    group.bench_function("typed_prefixes_indexed", |b| {
        b.iter(|| {
            for prefix in &prefixes {
                black_box(index.search(black_box(prefix)));
            }
        })
    });
    group.bench_function("typed_prefixes_linear", |b| {
        b.iter(|| {
            for prefix in &prefixes {
                black_box(linear_search(index.items(), black_box(prefix)));
            }
        })
    });

    for query in ["ak", "dlore", "m4 asii mw", "star karambit fade", "zzz"] {
        group.bench_with_input(BenchmarkId::new("query", query), &query, |b, query| {
            b.iter(|| index.search(black_box(query)))
        });
    }

    group.finish();
}

criterion_group!(benches, index_build_benchmarks, keystroke_search_benchmarks);
criterion_main!(benches);
