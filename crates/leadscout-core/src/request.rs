//! Search request model: engines, the country table, and validation.

use thiserror::Error;

/// Countries accepted in a search request, mapped to the two-letter region
/// code passed upstream. Lookup is case-insensitive on the country name.
const COUNTRY_TABLE: &[(&str, &str)] = &[
    ("usa", "us"),
    ("uk", "gb"),
    ("australia", "au"),
    ("canada", "ca"),
];

/// Human-readable list of accepted countries, used in error messages.
pub const SUPPORTED_COUNTRIES: &str = "usa, uk, australia, canada";

/// Resolves a country name to its upstream region code.
#[must_use]
pub fn region_code(country: &str) -> Option<&'static str> {
    let lowered = country.to_lowercase();
    COUNTRY_TABLE
        .iter()
        .find(|(name, _)| *name == lowered)
        .map(|(_, code)| *code)
}

/// Upstream search backend selecting both the outbound query shape and the
/// response shape to extract listings from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineId {
    GoogleMaps,
    Google,
    BingMaps,
    AppleMaps,
}

/// Human-readable list of accepted engines, used in error messages.
pub const SUPPORTED_ENGINES: &str = "google_maps, google, bing_maps, apple_maps";

impl EngineId {
    /// Wire identifier sent as the `engine` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EngineId::GoogleMaps => "google_maps",
            EngineId::Google => "google",
            EngineId::BingMaps => "bing_maps",
            EngineId::AppleMaps => "apple_maps",
        }
    }

    /// Parses a wire identifier, case-insensitively. Unknown names are `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "google_maps" => Some(EngineId::GoogleMaps),
            "google" => Some(EngineId::Google),
            "bing_maps" => Some(EngineId::BingMaps),
            "apple_maps" => Some(EngineId::AppleMaps),
            _ => None,
        }
    }

    /// Engine selection for the HTTP path: absent or unrecognized values
    /// fall back to `google_maps`.
    #[must_use]
    pub fn parse_or_default(s: Option<&str>) -> Self {
        s.and_then(Self::parse).unwrap_or_default()
    }

    /// Only the Google engines accept a region/locale filter.
    #[must_use]
    pub fn uses_region(self) -> bool {
        matches!(self, EngineId::GoogleMaps | EngineId::Google)
    }
}

impl Default for EngineId {
    fn default() -> Self {
        EngineId::GoogleMaps
    }
}

impl std::fmt::Display for EngineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("keyword is required")]
    MissingKeyword,

    #[error("unsupported country \"{0}\" (expected one of: {SUPPORTED_COUNTRIES})")]
    UnsupportedCountry(String),
}

/// A validated search request. Constructed per inbound request, consumed
/// immediately, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub keyword: String,
    /// Empty when the caller supplied no city.
    pub city: String,
    /// Lower-cased key of the country table.
    pub country: String,
    pub engine: EngineId,
}

impl SearchRequest {
    /// Validates and builds a request.
    ///
    /// # Errors
    ///
    /// - [`RequestError::MissingKeyword`] when the keyword is empty after
    ///   trimming.
    /// - [`RequestError::UnsupportedCountry`] when the country is not in the
    ///   country table.
    pub fn new(
        keyword: &str,
        city: &str,
        country: &str,
        engine: EngineId,
    ) -> Result<Self, RequestError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(RequestError::MissingKeyword);
        }

        let country = country.trim().to_lowercase();
        if region_code(&country).is_none() {
            return Err(RequestError::UnsupportedCountry(country));
        }

        Ok(Self {
            keyword: keyword.to_string(),
            city: city.trim().to_string(),
            country,
            engine,
        })
    }

    /// Region code for the validated country. Infallible because `new`
    /// already checked table membership.
    #[must_use]
    pub fn region_code(&self) -> &'static str {
        region_code(&self.country).unwrap_or("us")
    }

    /// Free-text query sent upstream: `"<keyword> in <city>"` when a city
    /// was supplied, otherwise the keyword alone.
    #[must_use]
    pub fn query(&self) -> String {
        if self.city.is_empty() {
            self.keyword.clone()
        } else {
            format!("{} in {}", self.keyword, self.city)
        }
    }
}
