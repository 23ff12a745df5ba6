//! Normalization from raw engine listings to [`BusinessRecord`].
//!
//! Field names vary by engine, so every canonical field is resolved through
//! a fallback chain in declared priority order. The original fallback
//! semantics are preserved exactly: a falsy value (`null`, `""`, `0`,
//! `false`) counts as absent, and the first truthy candidate wins.

use serde_json::Value;

use leadscout_core::record::{BusinessRecord, NOT_AVAILABLE, NO_NAME};

/// Normalizes one raw listing into a [`BusinessRecord`].
///
/// Pure and total: any input, including non-object values, produces a fully
/// populated record with sentinel defaults.
#[must_use]
pub fn normalize_listing(raw: &Value) -> BusinessRecord {
    BusinessRecord {
        name: field_or(raw, &["title", "name"], NO_NAME),
        address: field_or(raw, &["address", "street_address"], NOT_AVAILABLE),
        phone: field_or(raw, &["phone"], NOT_AVAILABLE),
        website: field_or(raw, &["website", "url"], NOT_AVAILABLE),
        rating: field_or(raw, &["rating"], NOT_AVAILABLE),
        reviews: field_or(raw, &["reviews", "review_count"], NOT_AVAILABLE),
        emails: None,
    }
}

/// Resolves a fallback chain: the first key holding a truthy value wins;
/// an exhausted chain yields the default sentinel.
fn field_or(raw: &Value, keys: &[&str], default: &str) -> String {
    keys.iter()
        .find_map(|key| raw.get(key).and_then(render_truthy))
        .unwrap_or_else(|| default.to_string())
}

/// Renders a JSON scalar to its display string, treating falsy values as
/// absent. Arrays and objects are not meaningful field values here and are
/// also treated as absent.
fn render_truthy(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => {
            if n.as_f64() == Some(0.0) {
                None
            } else {
                Some(n.to_string())
            }
        }
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}
