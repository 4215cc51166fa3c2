//! Raw catalog items and payload parsing.
//!
//! Catalog payloads are JSON arrays whose element shape varies by category.
//! Each element is mapped independently into the [`RawItem`] superset; the
//! category-specific part lands in [`CategoryFields`]. Only `name` is
//! required. Every other field is optional, and a field holding an
//! unexpected JSON type is treated as absent.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::kind::CatalogKind;
use crate::error::{CidxError, Result};

/// A rarity tier as shipped in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rarity {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Category-specific fields of a raw item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CategoryFields {
    Skin {
        weapon: Option<String>,
        min_float: Option<f64>,
        max_float: Option<f64>,
        stattrak: Option<bool>,
        souvenir: Option<bool>,
    },
    Sticker {
        tournament_event: Option<String>,
        tournament_team: Option<String>,
        sticker_type: Option<String>,
        effect: Option<String>,
    },
    Generic {
        item_type: Option<String>,
    },
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity: Option<Rarity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    pub fields: CategoryFields,
    /// Unrecognised keys, preserved verbatim.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl RawItem {
    /// Minimal item with generic fields, mostly for tests and fixtures.
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            image: image.into(),
            description: None,
            rarity: None,
            category: None,
            pattern: None,
            fields: CategoryFields::Generic { item_type: None },
            extra: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn with_fields(mut self, fields: CategoryFields) -> Self {
        self.fields = fields;
        self
    }

    /// Category label, empty when absent.
    #[must_use]
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }

    /// Pattern label, empty when absent.
    #[must_use]
    pub fn pattern_label(&self) -> &str {
        self.pattern.as_deref().unwrap_or("")
    }
}

/// An entry that could not be mapped into a [`RawItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedItem {
    /// Position in the source array.
    pub position: usize,
    pub reason: String,
}

/// Result of parsing one category payload.
#[derive(Debug, Clone, Default)]
pub struct ParsedCatalog {
    pub items: Vec<RawItem>,
    pub dropped: Vec<DroppedItem>,
}

/// Parse a category payload from its JSON text.
///
/// Blank text and `null` produce an empty catalog. Anything other than a JSON
/// array is an error for the whole payload; malformed elements inside a valid
/// array are dropped individually.
pub fn parse_payload(kind: CatalogKind, category: &str, json: &str) -> Result<ParsedCatalog> {
    if json.trim().is_empty() {
        return Ok(ParsedCatalog::default());
    }

    let value: Value = serde_json::from_str(json)?;
    match value {
        Value::Null => Ok(ParsedCatalog::default()),
        Value::Array(values) => Ok(parse_values(kind, category, values)),
        other => Err(CidxError::MalformedPayload {
            category: category.to_string(),
            reason: format!("expected a JSON array, found {}", json_type_name(&other)),
        }),
    }
}

/// Map already-parsed JSON values into raw items.
pub fn parse_values(kind: CatalogKind, category: &str, values: Vec<Value>) -> ParsedCatalog {
    let mut parsed = ParsedCatalog {
        items: Vec::with_capacity(values.len()),
        dropped: Vec::new(),
    };

    for (position, value) in values.into_iter().enumerate() {
        match map_item(kind, value) {
            Ok(item) => parsed.items.push(item),
            Err(reason) => {
                warn!(category, position, reason = %reason, "Dropping malformed catalog item");
                parsed.dropped.push(DroppedItem { position, reason });
            }
        }
    }

    debug!(
        category,
        items = parsed.items.len(),
        dropped = parsed.dropped.len(),
        "Parsed catalog payload"
    );
    parsed
}

fn map_item(kind: CatalogKind, value: Value) -> std::result::Result<RawItem, String> {
    if !value.is_object() {
        return Err(format!("expected an object, found {}", json_type_name(&value)));
    }

    let wire: WireItem =
        serde_json::from_value(value).map_err(|e| format!("unreadable item: {e}"))?;

    let name = match wire.name {
        Some(name) if !name.trim().is_empty() => name,
        Some(_) => return Err("empty `name`".to_string()),
        None => return Err("missing `name`".to_string()),
    };

    let fields = match kind {
        CatalogKind::Skins => CategoryFields::Skin {
            weapon: wire.weapon.map(Label::into_string),
            min_float: wire.min_float.or(wire.min_float_snake),
            max_float: wire.max_float.or(wire.max_float_snake),
            stattrak: wire.stattrak,
            souvenir: wire.souvenir,
        },
        CatalogKind::Stickers => CategoryFields::Sticker {
            tournament_event: wire
                .tournament_event
                .or(wire.tournament_event_snake)
                .or(wire.tournament)
                .map(Label::into_string),
            tournament_team: wire
                .tournament_team
                .or(wire.tournament_team_snake)
                .map(Label::into_string),
            sticker_type: wire.item_type.map(Label::into_string),
            effect: wire.effect.map(Label::into_string),
        },
        _ => CategoryFields::Generic {
            item_type: wire.item_type.map(Label::into_string),
        },
    };

    Ok(RawItem {
        id: wire.id.and_then(Label::into_non_empty),
        name,
        image: wire.image.unwrap_or_default(),
        description: wire.description,
        rarity: wire.rarity.and_then(RarityWire::into_rarity),
        category: wire.category.and_then(Label::into_non_empty),
        pattern: wire.pattern.and_then(Label::into_non_empty),
        fields,
        extra: wire.extra,
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A label field: either a plain string, a number, or an object with `name`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Label {
    Text(String),
    Number(serde_json::Number),
    Named {
        #[serde(default)]
        name: Option<String>,
    },
}

impl Label {
    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
            Self::Named { name } => name.unwrap_or_default(),
        }
    }

    fn into_non_empty(self) -> Option<String> {
        let text = self.into_string();
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RarityWire {
    Text(String),
    Named {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        color: Option<String>,
    },
}

impl RarityWire {
    fn into_rarity(self) -> Option<Rarity> {
        match self {
            Self::Text(name) if !name.is_empty() => Some(Rarity { name, color: None }),
            Self::Named {
                name: Some(name),
                color,
            } if !name.is_empty() => Some(Rarity { name, color }),
            _ => None,
        }
    }
}

/// Wire shape of one item. Fields with two spellings read each into its own
/// slot, so an item carrying both is still accepted; camelCase wins.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WireItem {
    #[serde(deserialize_with = "lenient")]
    id: Option<Label>,
    #[serde(deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    image: Option<String>,
    #[serde(deserialize_with = "lenient")]
    description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    rarity: Option<RarityWire>,
    #[serde(deserialize_with = "lenient")]
    weapon: Option<Label>,
    #[serde(deserialize_with = "lenient")]
    category: Option<Label>,
    #[serde(deserialize_with = "lenient")]
    pattern: Option<Label>,
    #[serde(deserialize_with = "lenient")]
    min_float: Option<f64>,
    #[serde(rename = "min_float", deserialize_with = "lenient")]
    min_float_snake: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    max_float: Option<f64>,
    #[serde(rename = "max_float", deserialize_with = "lenient")]
    max_float_snake: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    stattrak: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    souvenir: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    tournament: Option<Label>,
    #[serde(deserialize_with = "lenient")]
    tournament_event: Option<Label>,
    #[serde(rename = "tournament_event", deserialize_with = "lenient")]
    tournament_event_snake: Option<Label>,
    #[serde(deserialize_with = "lenient")]
    tournament_team: Option<Label>,
    #[serde(rename = "tournament_team", deserialize_with = "lenient")]
    tournament_team_snake: Option<Label>,
    #[serde(rename = "type", deserialize_with = "lenient")]
    item_type: Option<Label>,
    #[serde(deserialize_with = "lenient")]
    effect: Option<Label>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

/// Deserialize an optional field, mapping a wrong JSON type to `None`.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
