//! Application context shared by CLI commands.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::progress::{LoadProgressView, ProgressMode};
use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::{CidxError, Result};
use crate::store::{CategoryIndexStore, load_catalogs};

/// Loaded configuration, catalog store and output settings.
pub struct AppContext {
    pub root: PathBuf,
    pub config: Config,
    pub store: CategoryIndexStore,
    pub output_format: OutputFormat,
    pub robot_mode: bool,
    pub quiet: bool,
}

impl AppContext {
    /// Load config, apply `--source` overrides and load every catalog.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let root = std::env::current_dir()?;
        let mut config = Config::load(cli.config.as_deref(), &root)?;
        apply_source_overrides(&mut config, &cli.sources)?;

        let output_format = cli.output_format();
        let robot_mode = output_format.is_machine_readable();
        let mode = ProgressMode::detect(robot_mode, cli.quiet);
        let store = load_store(&config, mode);

        Ok(Self {
            root,
            config,
            store,
            output_format,
            robot_mode,
            quiet: cli.quiet,
        })
    }

    /// Context over an already-built store, without touching disk or network.
    #[must_use]
    pub fn with_store(
        root: &Path,
        config: Config,
        store: CategoryIndexStore,
        output_format: OutputFormat,
    ) -> Self {
        Self {
            root: root.to_path_buf(),
            config,
            store,
            output_format,
            robot_mode: output_format.is_machine_readable(),
            quiet: true,
        }
    }

    /// One warning line per category that failed to load.
    #[must_use]
    pub fn load_warnings(&self) -> Vec<String> {
        self.store
            .load_report()
            .failures
            .iter()
            .map(|f| format!("{} failed to load [{}]: {}", f.category, f.code, f.message))
            .collect()
    }
}

/// Merge `TYPE=SOURCE` arguments into the configured sources.
pub fn apply_source_overrides(config: &mut Config, sources: &[String]) -> Result<()> {
    for entry in sources {
        let (category, source) = entry.split_once('=').ok_or_else(|| {
            CidxError::Config(format!("invalid --source {entry:?}: expected TYPE=SOURCE"))
        })?;
        let category = category.trim();
        if category.is_empty() || source.trim().is_empty() {
            return Err(CidxError::Config(format!(
                "invalid --source {entry:?}: type and source must be non-empty"
            )));
        }
        debug!(category, "Catalog source overridden on the command line");
        config
            .catalog
            .sources
            .insert(category.to_string(), source.trim().to_string());
    }
    Ok(())
}

fn load_store(config: &Config, mode: ProgressMode) -> CategoryIndexStore {
    let total = config.catalog.sources.len();
    let (pending, progress) = load_catalogs(&config.catalog, &config.load);
    let view = LoadProgressView::new(mode, total);
    for event in &progress {
        view.update(&event);
    }
    let store = pending.wait();
    let report = store.load_report();
    view.finish(report.loaded, report.total);
    store
}
