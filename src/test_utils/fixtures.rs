use std::path::PathBuf;

use tempfile::TempDir;

use crate::catalog::CatalogKind;
use crate::search::CategoryIndex;
use crate::store::CategoryIndexStore;

/// Skins payload: AK-47 Redline with a StatTrak variant, an AWP with a
/// Souvenir-only counterpart and one malformed entry.
pub const SKINS_JSON: &str = r##"[
  {"id": "skin-1", "name": "AK-47 | Redline", "image": "ak-n.png",
   "weapon": {"name": "AK-47"}, "category": {"name": "Rifles"},
   "pattern": {"name": "Redline"}, "min_float": 0.10, "max_float": 0.70,
   "rarity": {"name": "Classified", "color": "#d32ce6"}},
  {"id": "skin-2", "name": "StatTrak™ AK-47 | Redline", "image": "ak-st.png",
   "weapon": {"name": "AK-47"}, "category": {"name": "Rifles"},
   "pattern": {"name": "Redline"}, "stattrak": true},
  {"id": "skin-3", "name": "AWP | Dragon Lore", "image": "awp-n.png",
   "weapon": {"name": "AWP"}, "category": {"name": "Sniper Rifles"},
   "pattern": {"name": "Dragon Lore"}},
  {"id": "skin-4", "name": "Souvenir AWP | Dragon Lore", "image": "awp-sv.png",
   "weapon": {"name": "AWP"}, "category": {"name": "Sniper Rifles"},
   "pattern": {"name": "Dragon Lore"}, "souvenir": true},
  {"id": "skin-5", "name": "M4A1-S | Printstream", "image": "m4-n.png",
   "weapon": {"name": "M4A1-S"}, "category": {"name": "Rifles"},
   "pattern": {"name": "Printstream"}},
  {"id": "skin-6", "image": "nameless.png"}
]"##;

pub const STICKERS_JSON: &str = r#"[
  {"id": "sticker-1", "name": "Sticker | Crown (Foil)", "image": "crown.png",
   "type": "Foil", "rarity": "Exotic"},
  {"id": "sticker-2", "name": "Sticker | Natus Vincere | Katowice 2014", "image": "navi.png",
   "tournament": {"name": "Katowice 2014"}, "tournament_team": "Natus Vincere"}
]"#;

pub const CASES_JSON: &str = r#"[
  {"id": "crate-1", "name": "Recoil Case", "image": "recoil.png", "type": "Case"},
  {"id": "crate-2", "name": "Dreams & Nightmares Case", "image": "dn.png", "type": "Case"},
  {"id": "crate-3", "name": "Kilowatt Case", "image": "kilowatt.png"}
]"#;

/// Sample payloads keyed by catalog type.
pub const SAMPLE_CATALOGS: &[(&str, &str)] = &[
    ("skins", SKINS_JSON),
    ("stickers", STICKERS_JSON),
    ("cases", CASES_JSON),
];

/// Index built from [`SKINS_JSON`].
pub fn skins_index() -> CategoryIndex {
    CategoryIndex::from_json("skins", CatalogKind::Skins, SKINS_JSON)
        .expect("skins fixture parses")
}

/// Store over every sample payload, with default aliases.
pub fn sample_store() -> CategoryIndexStore {
    CategoryIndexStore::from_payloads(SAMPLE_CATALOGS.iter().copied())
}

/// Isolated directory for catalog files and config.
pub struct CatalogFixture {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl CatalogFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();

        println!("[FIXTURE] Created temp directory: {}", root.display());

        Self { temp_dir, root }
    }

    /// Write `<category>.json` and return its path.
    pub fn write_catalog(&self, category: &str, json: &str) -> PathBuf {
        self.write_file(&format!("catalogs/{category}.json"), json)
    }

    /// Write every sample payload and return `(category, path)` pairs.
    pub fn write_samples(&self) -> Vec<(String, PathBuf)> {
        SAMPLE_CATALOGS
            .iter()
            .map(|(category, json)| ((*category).to_string(), self.write_catalog(category, json)))
            .collect()
    }

    /// Write `cidx.toml` at the fixture root.
    pub fn write_config(&self, toml: &str) -> PathBuf {
        self.write_file(crate::config::PROJECT_CONFIG_FILE, toml)
    }

    pub fn write_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.root.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        println!(
            "[FIXTURE] Wrote {} ({} bytes)",
            full_path.display(),
            content.len()
        );
        full_path
    }
}

impl Default for CatalogFixture {
    fn default() -> Self {
        Self::new()
    }
}
