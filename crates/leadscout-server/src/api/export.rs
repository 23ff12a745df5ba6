//! `POST /download-excel` — spreadsheet delivery.
//!
//! Results are passed explicitly in the request body rather than read from
//! process-global state, so concurrent searches can never hand a caller
//! someone else's export.

use axum::{
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use serde::Deserialize;

use leadscout_core::BusinessRecord;

use crate::api::ApiError;
use crate::middleware::RequestId;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Column order matches the canonical record's field order.
const COLUMNS: [&str; 6] = ["Name", "Address", "Phone", "Website", "Rating", "Reviews"];

#[derive(Debug, Deserialize)]
pub struct ExportBody {
    #[serde(default)]
    pub businesses: Vec<BusinessRecord>,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

/// Builds a single-sheet workbook from the supplied records and streams it
/// back as an attachment. An empty record list is rejected with `400` —
/// never an empty file.
pub async fn download_excel(
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ExportBody>,
) -> Result<Response, ApiError> {
    if body.businesses.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "no data available to export",
        ));
    }

    let filename = resolve_filename(
        body.filename.as_deref(),
        body.keyword.as_deref(),
        body.city.as_deref(),
        body.country.as_deref(),
    );

    let bytes = build_workbook(&body.businesses).map_err(|e| {
        tracing::error!(error = %e, "workbook encoding failed");
        ApiError::new(req_id.0.clone(), "internal_error", "failed to encode workbook")
    })?;

    tracing::info!(rows = body.businesses.len(), filename = %filename, "excel export");

    let headers = [
        (header::CONTENT_TYPE, XLSX_MIME.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, bytes).into_response())
}

/// Encodes the records as a single-sheet workbook: bold header row, one row
/// per record, columns in canonical field order.
pub(crate) fn build_workbook(records: &[BusinessRecord]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    for (col, title) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &bold)?;
    }

    for (idx, record) in records.iter().enumerate() {
        let row = (idx + 1) as u32;
        worksheet.write_string(row, 0, &record.name)?;
        worksheet.write_string(row, 1, &record.address)?;
        worksheet.write_string(row, 2, &record.phone)?;
        worksheet.write_string(row, 3, &record.website)?;
        worksheet.write_string(row, 4, &record.rating)?;
        worksheet.write_string(row, 5, &record.reviews)?;
    }

    workbook.save_to_buffer()
}

/// Picks the export filename: a caller-provided name wins, otherwise it is
/// derived as `<keyword>_<city?>_<country>.xlsx` (city omitted when absent),
/// with whitespace in each component collapsed to underscores.
pub(crate) fn resolve_filename(
    provided: Option<&str>,
    keyword: Option<&str>,
    city: Option<&str>,
    country: Option<&str>,
) -> String {
    if let Some(name) = provided.map(str::trim).filter(|n| !n.is_empty()) {
        let stem = name.strip_suffix(".xlsx").unwrap_or(name);
        return format!("{}.xlsx", collapse_whitespace(stem));
    }

    derive_filename(keyword, city, country)
}

fn derive_filename(keyword: Option<&str>, city: Option<&str>, country: Option<&str>) -> String {
    let keyword = keyword.map(str::trim).filter(|s| !s.is_empty());
    let country = country.map(str::trim).filter(|s| !s.is_empty());

    let (Some(keyword), Some(country)) = (keyword, country) else {
        return "businesses.xlsx".to_string();
    };

    let mut parts = vec![collapse_whitespace(keyword)];
    if let Some(city) = city.map(str::trim).filter(|s| !s.is_empty()) {
        parts.push(collapse_whitespace(city));
    }
    parts.push(collapse_whitespace(country));

    format!("{}.xlsx", parts.join("_"))
}

fn collapse_whitespace(component: &str) -> String {
    component.split_whitespace().collect::<Vec<_>>().join("_")
}
