//! Catalog search endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog::{filter_catalog, CATALOG_PAGE_SIZE};
use crate::error::ApiError;
use crate::types::CatalogEntry;
use crate::AppState;

/// Query parameters for catalog search
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// Substring matched against the four name fields; empty matches all
    #[serde(default)]
    pub query: String,
}

/// Catalog search response
///
/// `entries` holds at most one page; `total_matches` counts everything the
/// filter matched before truncation.
#[derive(Debug, Serialize)]
pub struct CatalogSearchResponse {
    pub query: String,
    pub total_matches: usize,
    pub page_size: usize,
    pub entries: Vec<CatalogEntry>,
}

/// GET /api/catalog?query=...
pub async fn search_catalog(
    State(state): State<AppState>,
    Query(params): Query<CatalogQuery>,
) -> Result<Json<CatalogSearchResponse>, ApiError> {
    let catalog = state.catalog_entries().await?;

    let matches = filter_catalog(&catalog, &params.query);
    let total_matches = matches.len();

    // Truncation is presentation-side; the filter itself never truncates
    let entries = matches
        .into_iter()
        .take(CATALOG_PAGE_SIZE)
        .cloned()
        .collect();

    Ok(Json(CatalogSearchResponse {
        query: params.query,
        total_matches,
        page_size: CATALOG_PAGE_SIZE,
        entries,
    }))
}
