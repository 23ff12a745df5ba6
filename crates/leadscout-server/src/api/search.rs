//! `POST /search` — JSON delivery of normalized business records.

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use leadscout_core::{BusinessRecord, EngineId, SearchRequest};
use leadscout_serp::normalize_listing;

use crate::api::{ApiError, AppState};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub struct SearchBody {
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub engine: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub businesses: Vec<BusinessRecord>,
}

/// Runs one search and returns the normalized records.
///
/// Validation failures are `400` with a descriptive message; upstream
/// failures are a generic `500` (the upstream detail only reaches the
/// logs). This path never enriches records with scraped emails.
pub async fn search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<SearchBody>,
) -> Result<Json<SearchResponse>, ApiError> {
    let keyword = body.keyword.as_deref().unwrap_or_default();
    if keyword.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "keyword is required",
        ));
    }

    let Some(country) = body.country.as_deref().filter(|c| !c.trim().is_empty()) else {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "country is required",
        ));
    };

    // Absent or unrecognized engines silently fall back to google_maps on
    // this path; only the chat command grammar rejects unknown engines.
    let engine = EngineId::parse_or_default(body.engine.as_deref());

    let request = SearchRequest::new(
        keyword,
        body.city.as_deref().unwrap_or_default(),
        country,
        engine,
    )
    .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?;

    tracing::info!(
        keyword = %request.keyword,
        city = %request.city,
        country = %request.country,
        engine = %request.engine,
        "http search"
    );

    let listings = state.serp.search(&request).await.map_err(|e| {
        tracing::error!(engine = %request.engine, error = %e, "upstream search failed");
        ApiError::new(req_id.0.clone(), "upstream_error", "search failed")
    })?;

    let businesses = listings.iter().map(normalize_listing).collect();
    Ok(Json(SearchResponse { businesses }))
}
