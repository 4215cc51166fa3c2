use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::IntoDeserializer;
use serde::{Deserialize, Serialize};

use crate::catalog::DEFAULT_TYPE_ALIASES;
use crate::error::{CidxError, Result};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CIDX_CONFIG";

/// Project-level config file name, looked up in the working root.
pub const PROJECT_CONFIG_FILE: &str = "cidx.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub load: LoadConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

impl Config {
    /// Load defaults, then config files, then `CIDX_*` environment overrides.
    ///
    /// An explicit path (argument or `CIDX_CONFIG`) replaces the global and
    /// project files instead of layering on top of them.
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let global = dirs::config_dir().map(|dir| dir.join("cidx/config.toml"));
        Self::load_with(explicit_path, root, global.as_deref(), |key| {
            std::env::var(key).ok()
        })
    }

    /// [`Config::load`] with the global path and environment lookup supplied
    /// by the caller.
    pub fn load_with(
        explicit_path: Option<&Path>,
        root: &Path,
        global_path: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| env(CONFIG_ENV).map(PathBuf::from));

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(CidxError::ConfigNotFound {
                    path: path.display().to_string(),
                });
            }
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = global_path {
                if let Some(patch) = Self::load_patch(global)? {
                    config.merge_patch(patch);
                }
            }
            if let Some(project) = Self::load_patch(&root.join(PROJECT_CONFIG_FILE))? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides(&env)?;
        config.validate()?;

        Ok(config)
    }

    /// Parse a config document without touching files or the environment.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let patch: ConfigPatch =
            toml::from_str(raw).map_err(|err| CidxError::Config(format!("parse config: {err}")))?;
        let mut config = Self::default();
        config.merge_patch(patch);
        config.validate()?;
        Ok(config)
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| CidxError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| CidxError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.catalog {
            self.catalog.merge(patch);
        }
        if let Some(patch) = patch.load {
            self.load.merge(patch);
        }
        if let Some(patch) = patch.search {
            self.search.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self, env: &impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(pairs) = env_pairs(env, "CIDX_SOURCES")? {
            self.catalog.sources.extend(pairs);
        }
        if let Some(pairs) = env_pairs(env, "CIDX_ALIASES")? {
            self.catalog.aliases.extend(pairs);
        }

        if let Some(value) = env_duration(env, "CIDX_LOAD_TIMEOUT")? {
            self.load.timeout = value;
        }
        if let Some(value) = env_parse::<usize>(env, "CIDX_LOAD_CONCURRENCY")? {
            self.load.concurrency = value;
        }
        if let Some(value) = env_parse::<u32>(env, "CIDX_LOAD_RETRIES")? {
            self.load.retries = value;
        }

        if let Some(value) = env_parse::<usize>(env, "CIDX_SEARCH_DEFAULT_LIMIT")? {
            self.search.default_limit = value;
        }

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.load.timeout.is_zero() {
            return Err(CidxError::Config("load.timeout must be greater than zero".to_string()));
        }
        if self.load.retry_base_delay_ms > self.load.retry_max_delay_ms {
            return Err(CidxError::Config(format!(
                "load.retry_base_delay_ms ({}) exceeds load.retry_max_delay_ms ({})",
                self.load.retry_base_delay_ms, self.load.retry_max_delay_ms
            )));
        }
        if self.search.default_limit == 0 {
            return Err(CidxError::Config(
                "search.default_limit must be greater than zero".to_string(),
            ));
        }
        for (category, target) in &self.catalog.aliases {
            if category.trim().is_empty() || target.trim().is_empty() {
                return Err(CidxError::Config(format!(
                    "catalog.aliases has an empty entry: {category:?} -> {target:?}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Category name to source: URL, file path or inline JSON array.
    pub sources: BTreeMap<String, String>,
    /// Requested type name to loaded category name.
    pub aliases: BTreeMap<String, String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            sources: BTreeMap::new(),
            aliases: DEFAULT_TYPE_ALIASES
                .iter()
                .map(|(alias, target)| ((*alias).to_string(), (*target).to_string()))
                .collect(),
        }
    }
}

impl CatalogConfig {
    fn merge(&mut self, patch: CatalogPatch) {
        if let Some(sources) = patch.sources {
            self.sources.extend(sources);
        }
        if let Some(aliases) = patch.aliases {
            self.aliases.extend(aliases);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Upper bound for a single fetch attempt.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Worker threads for fetch and build; 0 lets rayon decide.
    pub concurrency: usize,
    pub retries: u32,
    pub retry_base_delay_ms: u64,
    pub retry_max_delay_ms: u64,
}

const fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            concurrency: 4,
            retries: 2,
            retry_base_delay_ms: 250,
            retry_max_delay_ms: 5_000,
        }
    }
}

impl LoadConfig {
    fn merge(&mut self, patch: LoadPatch) {
        if let Some(value) = patch.timeout {
            self.timeout = value;
        }
        if let Some(value) = patch.concurrency {
            self.concurrency = value;
        }
        if let Some(value) = patch.retries {
            self.retries = value;
        }
        if let Some(value) = patch.retry_base_delay_ms {
            self.retry_base_delay_ms = value;
        }
        if let Some(value) = patch.retry_max_delay_ms {
            self.retry_max_delay_ms = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Result cap for CLI display. The engine itself never truncates.
    pub default_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { default_limit: 50 }
    }
}

impl SearchConfig {
    fn merge(&mut self, patch: SearchPatch) {
        if let Some(value) = patch.default_limit {
            self.default_limit = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub catalog: Option<CatalogPatch>,
    pub load: Option<LoadPatch>,
    pub search: Option<SearchPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CatalogPatch {
    pub sources: Option<BTreeMap<String, String>>,
    pub aliases: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct LoadPatch {
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
    pub concurrency: Option<usize>,
    pub retries: Option<u32>,
    pub retry_base_delay_ms: Option<u64>,
    pub retry_max_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SearchPatch {
    pub default_limit: Option<usize>,
}

fn env_parse<T>(env: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env(key) {
        Some(value) => value.trim().parse::<T>().map(Some).map_err(|err| {
            CidxError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        None => Ok(None),
    }
}

fn env_duration(env: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<Duration>> {
    match env(key) {
        Some(value) => {
            let parsed: std::result::Result<humantime_serde::Serde<Duration>, serde::de::value::Error> =
                Deserialize::deserialize(value.trim().into_deserializer());
            parsed
                .map(|d| Some(d.into_inner()))
                .map_err(|err| CidxError::Config(format!("invalid {key} value {value}: {err}")))
        }
        None => Ok(None),
    }
}

/// `a=b,c=d` pairs; blank entries are skipped.
fn env_pairs(
    env: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<Vec<(String, String)>>> {
    let Some(value) = env(key) else {
        return Ok(None);
    };
    let mut pairs = Vec::new();
    for entry in value.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (name, target) = entry.split_once('=').ok_or_else(|| {
            CidxError::Config(format!("invalid {key} entry {entry:?}: expected name=value"))
        })?;
        pairs.push((name.trim().to_string(), target.trim().to_string()));
    }
    Ok(Some(pairs))
}
