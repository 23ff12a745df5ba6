//! Engine-specific listing extraction.
//!
//! Each engine answers with its own response shape; this module is the
//! tagged-variant dispatch that pulls the raw listing array out of a parsed
//! response body. Extraction never fails: a missing (or non-array) field
//! falls through to the next candidate, and an exhausted candidate list
//! yields an empty vec.

use serde_json::Value;

use leadscout_core::EngineId;

/// Extracts raw listing records from an engine response body.
///
/// Field priority per engine:
/// - `google_maps` → `local_results`
/// - `google` → `local_results`, else `organic_results`
/// - `bing_maps` / `apple_maps` → `places`
#[must_use]
pub fn extract_listings(engine: EngineId, body: &Value) -> Vec<Value> {
    let listings = match engine {
        EngineId::GoogleMaps => array_field(body, "local_results"),
        EngineId::Google => {
            array_field(body, "local_results").or_else(|| array_field(body, "organic_results"))
        }
        EngineId::BingMaps | EngineId::AppleMaps => array_field(body, "places"),
    };

    listings.cloned().unwrap_or_default()
}

/// A present-but-non-array field counts as absent.
fn array_field<'a>(body: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    match body.get(key) {
        Some(Value::Array(items)) => Some(items),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn google_maps_reads_local_results() {
        let body = json!({"local_results": [{"title": "Joe's Pizza"}]});
        let listings = extract_listings(EngineId::GoogleMaps, &body);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0]["title"], "Joe's Pizza");
    }

    #[test]
    fn google_maps_ignores_places() {
        // `places` belongs to the Bing/Apple shapes and must not leak in.
        let body = json!({"places": [{"name": "Wrong Shape"}]});
        assert!(extract_listings(EngineId::GoogleMaps, &body).is_empty());
    }

    #[test]
    fn google_prefers_local_results_over_organic() {
        let body = json!({
            "local_results": [{"title": "Local"}],
            "organic_results": [{"title": "Organic"}]
        });
        let listings = extract_listings(EngineId::Google, &body);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0]["title"], "Local");
    }

    #[test]
    fn google_falls_back_to_organic_results() {
        let body = json!({"organic_results": [{"title": "Organic"}]});
        let listings = extract_listings(EngineId::Google, &body);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0]["title"], "Organic");
    }

    #[test]
    fn bing_and_apple_read_places() {
        let body = json!({"places": [{"name": "Harbour Cafe"}, {"name": "Pier Diner"}]});
        assert_eq!(extract_listings(EngineId::BingMaps, &body).len(), 2);
        assert_eq!(extract_listings(EngineId::AppleMaps, &body).len(), 2);
    }

    #[test]
    fn missing_fields_yield_empty_list() {
        let body = json!({"search_metadata": {"status": "Success"}});
        assert!(extract_listings(EngineId::GoogleMaps, &body).is_empty());
        assert!(extract_listings(EngineId::Google, &body).is_empty());
        assert!(extract_listings(EngineId::BingMaps, &body).is_empty());
    }

    #[test]
    fn non_array_field_counts_as_absent() {
        let body = json!({
            "local_results": {"more_locations_link": "https://example.com"},
            "organic_results": [{"title": "Organic"}]
        });
        let listings = extract_listings(EngineId::Google, &body);
        assert_eq!(
            listings.len(),
            1,
            "object-shaped local_results must fall through to organic_results"
        );
        assert_eq!(listings[0]["title"], "Organic");
    }
}
