//! Concurrent catalog loading with a progress stream
//!
//! Every category is fetched, parsed and indexed independently on a bounded
//! rayon pool that runs off the caller's thread. A category that fails to
//! load ends up as an empty index plus a [`CategoryFailure`]; it never stops
//! the other categories.

use std::collections::BTreeMap;
use std::thread::JoinHandle;
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;
use rayon::prelude::*;
use reqwest::blocking::Client;
use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::{CatalogKind, parse_payload};
use crate::config::{CatalogConfig, LoadConfig};
use crate::error::{CidxError, ErrorCode};
use crate::search::CategoryIndex;

use super::{CategoryIndexStore, dedupe_by_type};
use super::source::{CatalogSource, RetryPolicy, build_client};

/// How one category's load ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadOutcome {
    Loaded { base_items: usize, dropped: usize },
    Failed { code: ErrorCode, message: String },
}

impl LoadOutcome {
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

/// One progress event, emitted as each category finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadProgress {
    pub category: String,
    /// Categories finished so far, successful or not.
    pub completed: usize,
    /// Categories loaded successfully so far.
    pub loaded: usize,
    pub total: usize,
    pub outcome: LoadOutcome,
}

/// A category whose payload could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryFailure {
    pub category: String,
    pub source: String,
    pub code: ErrorCode,
    pub message: String,
}

impl CategoryFailure {
    pub(crate) fn new(category: &str, source: &str, error: &CidxError) -> Self {
        Self {
            category: category.to_string(),
            source: source.to_string(),
            code: error.code(),
            message: error.to_string(),
        }
    }
}

/// Summary of a finished load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub loaded: usize,
    pub total: usize,
    pub failures: Vec<CategoryFailure>,
}

impl LoadReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.loaded == self.total
    }

    #[must_use]
    pub fn failure_for(&self, category: &str) -> Option<&CategoryFailure> {
        self.failures.iter().find(|f| f.category == category)
    }
}

/// A load in flight. [`PendingStore::wait`] yields the finished store.
#[derive(Debug)]
pub struct PendingStore {
    state: PendingState,
    categories: Vec<String>,
    aliases: BTreeMap<String, String>,
}

#[derive(Debug)]
enum PendingState {
    Running(JoinHandle<CategoryIndexStore>),
    Ready(Box<CategoryIndexStore>),
}

impl PendingStore {
    /// Whether the loader has finished; `wait` will not block once true.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        match &self.state {
            PendingState::Running(handle) => handle.is_finished(),
            PendingState::Ready(_) => true,
        }
    }

    /// Block until every category has finished loading.
    ///
    /// Never fails: if the loader thread died, every category is reported
    /// as failed and left empty.
    pub fn wait(self) -> CategoryIndexStore {
        match self.state {
            PendingState::Ready(store) => *store,
            PendingState::Running(handle) => handle.join().unwrap_or_else(|_| {
                let error = CidxError::Internal("catalog loader thread panicked".to_string());
                warn!(error = %error, "Catalog load aborted");
                failed_store(&self.categories, self.aliases, &error)
            }),
        }
    }
}

/// Every category empty and recorded as failed with `error`.
fn failed_store(
    categories: &[String],
    aliases: BTreeMap<String, String>,
    error: &CidxError,
) -> CategoryIndexStore {
    let failures = categories
        .iter()
        .map(|category| CategoryFailure::new(category, "", error))
        .collect();
    let indexes = categories
        .iter()
        .map(|category| CategoryIndex::empty(category.clone(), CatalogKind::from_type_name(category)))
        .collect::<Vec<_>>();
    CategoryIndexStore::from_indexes(indexes, aliases).with_report(LoadReport {
        loaded: 0,
        total: categories.len(),
        failures,
    })
}

struct LoadJob {
    category: String,
    source: CatalogSource,
}

#[derive(Default)]
struct Counters {
    completed: usize,
    loaded: usize,
}

/// Start loading every configured category.
///
/// Returns immediately. Progress events arrive on the receiver as each
/// category finishes; the channel closes when the load is done.
pub fn load_catalogs(
    catalog: &CatalogConfig,
    config: &LoadConfig,
) -> (PendingStore, Receiver<LoadProgress>) {
    let jobs: Vec<LoadJob> = dedupe_by_type(&catalog.sources)
        .into_iter()
        .map(|(category, source)| LoadJob {
            category,
            source: CatalogSource::parse(source),
        })
        .collect();
    let categories: Vec<String> = jobs.iter().map(|job| job.category.clone()).collect();
    let aliases = catalog.aliases.clone();
    let config = config.clone();
    let (tx, rx) = crossbeam_channel::unbounded();

    let thread_aliases = aliases.clone();
    let spawned = std::thread::Builder::new()
        .name("cidx-loader".to_string())
        .spawn(move || run_load(jobs, thread_aliases, &config, &tx));

    let state = match spawned {
        Ok(handle) => PendingState::Running(handle),
        Err(e) => {
            warn!(error = %e, "Failed to spawn loader thread");
            let error = CidxError::Internal(format!("failed to spawn loader thread: {e}"));
            PendingState::Ready(Box::new(failed_store(&categories, aliases.clone(), &error)))
        }
    };

    (
        PendingStore {
            state,
            categories,
            aliases,
        },
        rx,
    )
}

/// Load every category and block until done, discarding progress.
pub fn load_catalogs_blocking(catalog: &CatalogConfig, config: &LoadConfig) -> CategoryIndexStore {
    let (pending, _progress) = load_catalogs(catalog, config);
    pending.wait()
}

fn run_load(
    jobs: Vec<LoadJob>,
    aliases: BTreeMap<String, String>,
    config: &LoadConfig,
    tx: &Sender<LoadProgress>,
) -> CategoryIndexStore {
    let started = Instant::now();
    let total = jobs.len();
    let policy = RetryPolicy::from(config);

    let client = if jobs.iter().any(|job| job.source.is_remote()) {
        match build_client(config.timeout) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!(error = %e, "Failed to build HTTP client");
                None
            }
        }
    } else {
        None
    };

    let counters = Mutex::new(Counters::default());
    let run_job = |job: &LoadJob| {
        let (index, failure) = load_one(job, client.as_ref(), &policy);
        let outcome = match &failure {
            None => LoadOutcome::Loaded {
                base_items: index.len(),
                dropped: index.stats().dropped,
            },
            Some(failure) => LoadOutcome::Failed {
                code: failure.code,
                message: failure.message.clone(),
            },
        };

        // hold the lock while sending so counters arrive in order
        let mut counts = counters.lock();
        counts.completed += 1;
        if outcome.is_loaded() {
            counts.loaded += 1;
        }
        let _ = tx.send(LoadProgress {
            category: job.category.clone(),
            completed: counts.completed,
            loaded: counts.loaded,
            total,
            outcome,
        });
        drop(counts);

        (index, failure)
    };

    let results: Vec<(CategoryIndex, Option<CategoryFailure>)> =
        match rayon::ThreadPoolBuilder::new()
            .num_threads(config.concurrency)
            .thread_name(|i| format!("cidx-load-{i}"))
            .build()
        {
            Ok(pool) => pool.install(|| jobs.par_iter().map(run_job).collect()),
            Err(e) => {
                warn!(error = %e, "Failed to build loader pool, loading sequentially");
                jobs.iter().map(run_job).collect()
            }
        };

    let mut indexes = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for (index, failure) in results {
        indexes.push(index);
        failures.extend(failure);
    }

    let report = LoadReport {
        loaded: total - failures.len(),
        total,
        failures,
    };
    info!(
        loaded = report.loaded,
        total = report.total,
        failed = report.failures.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Catalog load finished"
    );

    CategoryIndexStore::from_indexes(indexes, aliases).with_report(report)
}

fn load_one(
    job: &LoadJob,
    client: Option<&Client>,
    policy: &RetryPolicy,
) -> (CategoryIndex, Option<CategoryFailure>) {
    let kind = CatalogKind::from_type_name(&job.category);
    let source_label = job.source.to_string();

    let built = fetch_payload(job, client, policy)
        .and_then(|json| parse_payload(kind, &job.category, &json))
        .map(|parsed| CategoryIndex::from_parsed(job.category.clone(), kind, parsed));

    match built {
        Ok(index) => (index, None),
        Err(error) => {
            warn!(
                category = %job.category,
                source = %source_label,
                error = %error,
                "Category failed to load; continuing with an empty index"
            );
            (
                CategoryIndex::empty(job.category.clone(), kind),
                Some(CategoryFailure::new(&job.category, &source_label, &error)),
            )
        }
    }
}

fn fetch_payload(
    job: &LoadJob,
    client: Option<&Client>,
    policy: &RetryPolicy,
) -> crate::error::Result<String> {
    match (&job.source, client) {
        (CatalogSource::Url(_), Some(client)) => job.source.fetch(client, policy),
        (CatalogSource::Url(url), None) => Err(CidxError::Internal(format!(
            "no HTTP client available to fetch {url}"
        ))),
        (local, _) => local.read_local(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn catalog(sources: &[(&str, &str)]) -> CatalogConfig {
        let mut config = CatalogConfig::default();
        for (category, source) in sources {
            config
                .sources
                .insert((*category).to_string(), (*source).to_string());
        }
        config
    }

    fn fast_load() -> LoadConfig {
        LoadConfig {
            timeout: Duration::from_secs(5),
            concurrency: 2,
            retries: 0,
            retry_base_delay_ms: 1,
            retry_max_delay_ms: 1,
        }
    }

    #[test]
    fn inline_sources_load_and_report_progress() {
        let config = catalog(&[
            ("skins", r#"[{"name":"AK-47 | Redline","image":"a"}]"#),
            ("cases", r#"[{"name":"Recoil Case","image":"r"},{"name":"Gamma Case","image":"g"}]"#),
        ]);
        let (pending, progress) = load_catalogs(&config, &fast_load());
        let store = pending.wait();
        let events: Vec<LoadProgress> = progress.iter().collect();

        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.total == 2));
        assert_eq!(events.last().map(|e| (e.completed, e.loaded)), Some((2, 2)));
        assert!(events.windows(2).all(|w| w[0].completed < w[1].completed));

        assert_eq!(store.get_items_for_type("cases").len(), 2);
        assert!(store.load_report().is_complete());
    }

    #[test]
    fn one_failure_does_not_block_others() {
        let config = catalog(&[
            ("skins", r#"[{"name":"AK-47 | Redline","image":"a"}]"#),
            ("stickers", "/nonexistent/stickers.json"),
        ]);
        let store = load_catalogs_blocking(&config, &fast_load());

        let report = store.load_report();
        assert_eq!(report.loaded, 1);
        assert_eq!(report.total, 2);
        let failure = report.failure_for("stickers").unwrap();
        assert_eq!(failure.code, ErrorCode::StorageReadError);

        assert!(store.get_items_for_type("stickers").is_empty());
        assert_eq!(store.search("skins", "ak red").len(), 1);
    }

    #[test]
    fn non_array_payload_fails_the_category() {
        let config = catalog(&[("agents", r#"{"name":"not an array"}"#)]);
        let (pending, progress) = load_catalogs(&config, &fast_load());
        let store = pending.wait();

        let event = progress.recv().unwrap();
        assert_eq!(event.loaded, 0);
        assert!(matches!(
            event.outcome,
            LoadOutcome::Failed { code: ErrorCode::MalformedPayload, .. }
        ));
        assert!(store.get_index_for_type("agents").is_some_and(CategoryIndex::is_empty));
    }

    #[test]
    fn no_sources_is_an_empty_finished_load() {
        let store = load_catalogs_blocking(&CatalogConfig::default(), &fast_load());
        assert_eq!(store.categories().count(), 0);
        assert_eq!(store.load_report().total, 0);
        assert!(store.load_report().is_complete());
    }

    #[test]
    fn case_variants_of_one_source_count_once() {
        let config = catalog(&[
            ("Skins", r#"[{"name":"AWP | Asiimov","image":"a"}]"#),
            ("skins", "/nonexistent/skins.json"),
        ]);
        let (pending, progress) = load_catalogs(&config, &fast_load());
        let store = pending.wait();
        let events: Vec<LoadProgress> = progress.iter().collect();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].total, 1);
        assert_eq!(store.categories().collect::<Vec<_>>(), vec!["skins"]);
        // sources iterate in key order, so the lowercase entry comes last
        let report = store.load_report();
        assert_eq!((report.loaded, report.total), (0, 1));
        assert_eq!(
            report.failure_for("skins").map(|f| f.code),
            Some(ErrorCode::StorageReadError)
        );
    }

    #[test]
    fn category_names_are_case_folded() {
        let config = catalog(&[(" Skins ", r#"[{"name":"AWP | Asiimov","image":"a"}]"#)]);
        let store = load_catalogs_blocking(&config, &fast_load());
        assert_eq!(store.categories().collect::<Vec<_>>(), vec!["skins"]);
        assert_eq!(store.search("liquids", "asii").len(), 1);
    }
}
