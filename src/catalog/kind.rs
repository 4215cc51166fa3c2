//! Catalog types and variant tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type aliases applied before a type name is looked up in the store.
pub const DEFAULT_TYPE_ALIASES: &[(&str, &str)] = &[("liquids", "skins")];

/// The kind of catalog a payload belongs to.
///
/// Only `Skins` and `Stickers` get dedicated field mapping; every other kind
/// (including unrecognised type names) is indexed with generic metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Skins,
    Cases,
    Stickers,
    Agents,
    Keychains,
    Graffiti,
    Patches,
    MusicKits,
    Highlights,
    Other,
}

impl CatalogKind {
    /// Every named catalog kind, in display order.
    pub const ALL: [Self; 9] = [
        Self::Skins,
        Self::Cases,
        Self::Stickers,
        Self::Agents,
        Self::Keychains,
        Self::Graffiti,
        Self::Patches,
        Self::MusicKits,
        Self::Highlights,
    ];

    /// Map a catalog type name onto a kind.
    ///
    /// Accepts singular/plural and `_`/`-`/no-separator spellings. Names that
    /// match nothing map to [`CatalogKind::Other`].
    #[must_use]
    pub fn from_type_name(name: &str) -> Self {
        let compact: String = name
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect();

        match compact.as_str() {
            "skins" | "skin" => Self::Skins,
            "cases" | "case" | "crates" | "crate" => Self::Cases,
            "stickers" | "sticker" => Self::Stickers,
            "agents" | "agent" => Self::Agents,
            "keychains" | "keychain" | "charms" => Self::Keychains,
            "graffiti" | "graffitis" => Self::Graffiti,
            "patches" | "patch" => Self::Patches,
            "musickits" | "musickit" | "music" => Self::MusicKits,
            "highlights" | "highlight" => Self::Highlights,
            _ => Self::Other,
        }
    }

    /// Canonical type name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Skins => "skins",
            Self::Cases => "cases",
            Self::Stickers => "stickers",
            Self::Agents => "agents",
            Self::Keychains => "keychains",
            Self::Graffiti => "graffiti",
            Self::Patches => "patches",
            Self::MusicKits => "music_kits",
            Self::Highlights => "highlights",
            Self::Other => "other",
        }
    }

    /// Singular display label, used as the item type when a payload has none.
    #[must_use]
    pub const fn item_label(&self) -> &'static str {
        match self {
            Self::Skins => "Skin",
            Self::Cases => "Case",
            Self::Stickers => "Sticker",
            Self::Agents => "Agent",
            Self::Keychains => "Keychain",
            Self::Graffiti => "Graffiti",
            Self::Patches => "Patch",
            Self::MusicKits => "Music Kit",
            Self::Highlights => "Highlight",
            Self::Other => "Item",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant tag of a raw item within its base item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Normal,
    #[serde(rename = "stattrak")]
    StatTrak,
    Souvenir,
}

impl Variant {
    pub const ALL: [Self; 3] = [Self::Normal, Self::StatTrak, Self::Souvenir];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::StatTrak => "stattrak",
            Self::Souvenir => "souvenir",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" | "" => Ok(Self::Normal),
            "stattrak" | "st" | "stat-trak" => Ok(Self::StatTrak),
            "souvenir" | "sv" => Ok(Self::Souvenir),
            other => Err(format!(
                "invalid variant {other} (expected normal|stattrak|souvenir)"
            )),
        }
    }
}
