//! Context-aware error suggestions.
//!
//! Complements the static suggestions in the `codes` module with hints built
//! from the error context (requested type, item name, config path).

use serde_json::Value;

use super::codes::ErrorCode;

/// Generate a context-aware suggestion for an error.
///
/// Falls back to [`ErrorCode::suggestion`] when the context carries nothing
/// more specific.
pub fn suggest_for_error(code: ErrorCode, context: Option<&Value>) -> String {
    match code {
        ErrorCode::CategoryNotFound => suggest_category_not_found(context),
        ErrorCode::ItemNotFound => suggest_item_not_found(context),
        ErrorCode::ConfigNotFound => suggest_config_not_found(context),
        ErrorCode::NetworkBadStatus => suggest_bad_status(context),
        _ => code.suggestion().to_string(),
    }
}

fn suggest_category_not_found(context: Option<&Value>) -> String {
    let requested = context
        .and_then(|c| c.get("type"))
        .and_then(Value::as_str);
    let known: Vec<&str> = context
        .and_then(|c| c.get("known"))
        .and_then(Value::as_array)
        .map(|values| values.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let Some(requested) = requested else {
        return ErrorCode::CategoryNotFound.suggestion().to_string();
    };

    let similar = suggest_similar_types(requested, &known, 3);
    if similar.is_empty() {
        format!(
            "Catalog type '{requested}' is not loaded. Run `cidx types` to see loaded types"
        )
    } else {
        format!(
            "Catalog type '{requested}' is not loaded. Did you mean: {}?",
            similar.join(", ")
        )
    }
}

fn suggest_item_not_found(context: Option<&Value>) -> String {
    let name = context
        .and_then(|c| c.get("name"))
        .and_then(Value::as_str);
    let category = context
        .and_then(|c| c.get("type"))
        .and_then(Value::as_str);

    match (category, name) {
        (Some(category), Some(name)) => format!(
            "No base item named '{name}' in '{category}'. Try `cidx search {category} {name}`"
        ),
        _ => ErrorCode::ItemNotFound.suggestion().to_string(),
    }
}

fn suggest_config_not_found(context: Option<&Value>) -> String {
    context
        .and_then(|c| c.get("path"))
        .and_then(Value::as_str)
        .map_or_else(
            || ErrorCode::ConfigNotFound.suggestion().to_string(),
            |path| format!("Create {path}, or unset CIDX_CONFIG to use cidx.toml"),
        )
}

fn suggest_bad_status(context: Option<&Value>) -> String {
    let status = context
        .and_then(|c| c.get("status"))
        .and_then(Value::as_u64);

    match status {
        Some(404) => "The catalog URL returned 404; check the path".to_string(),
        Some(code) if code >= 500 => {
            "The catalog server failed; retry later or raise load.retries".to_string()
        }
        _ => ErrorCode::NetworkBadStatus.suggestion().to_string(),
    }
}

/// Suggest known catalog type names close to a misspelled one.
pub fn suggest_similar_types(query: &str, available: &[&str], max_suggestions: usize) -> Vec<String> {
    let query_lower = query.to_lowercase();
    let mut scored: Vec<_> = available
        .iter()
        .map(|s| (s, similarity_score(&query_lower, &s.to_lowercase())))
        .filter(|(_, score)| *score > 0.3)
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored
        .into_iter()
        .take(max_suggestions)
        .map(|(s, _)| (*s).to_string())
        .collect()
}

/// Jaccard similarity over character trigrams.
fn similarity_score(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a_trigrams: std::collections::HashSet<_> = trigrams(a).collect();
    let b_trigrams: std::collections::HashSet<_> = trigrams(b).collect();

    if a_trigrams.is_empty() || b_trigrams.is_empty() {
        if a.starts_with(b) || b.starts_with(a) {
            return 0.8;
        }
        if a.contains(b) || b.contains(a) {
            return 0.5;
        }
        return 0.0;
    }

    let intersection = a_trigrams.intersection(&b_trigrams).count();
    let union = a_trigrams.union(&b_trigrams).count();

    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

fn trigrams(s: &str) -> impl Iterator<Item = &str> {
    (0..s.len().saturating_sub(2)).filter_map(move |i| s.get(i..i + 3))
}
