//! Program catalog index
//!
//! The catalog is a static JSON snapshot fetched once per client call and
//! filtered in memory. The snapshot is either a bare array of entries or an
//! object wrapping the array under a `course` field; anything else is
//! malformed and fails loudly rather than yielding a silent empty catalog.

use crate::types::CatalogEntry;
use serde_json::Value;
use std::time::Duration;
use uniplan_common::{Error, Result};

const USER_AGENT: &str = "uniplan/0.1.0";

/// Page size applied by the HTTP handler when returning search results.
/// Filtering itself never truncates; truncation is a presentation concern.
pub const CATALOG_PAGE_SIZE: usize = 10;

/// Catalog snapshot client
pub struct CatalogClient {
    http_client: reqwest::Client,
    catalog_url: String,
}

impl CatalogClient {
    /// Create new catalog client for the given snapshot URL
    pub fn new(catalog_url: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Fetch(e.to_string()))?;

        Ok(Self {
            http_client,
            catalog_url: catalog_url.into(),
        })
    }

    /// Fetch and parse the catalog snapshot
    pub async fn load(&self) -> Result<Vec<CatalogEntry>> {
        tracing::debug!(url = %self.catalog_url, "Fetching program catalog");

        let response = self
            .http_client
            .get(&self.catalog_url)
            .send()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!(
                "Catalog fetch returned HTTP {}",
                status.as_u16()
            )));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| Error::Fetch(format!("Catalog payload is not JSON: {}", e)))?;

        let entries = parse_catalog(json)?;
        tracing::info!("Loaded {} catalog entries", entries.len());
        Ok(entries)
    }
}

/// Parse a catalog payload: bare array, or object with a `course` array
pub fn parse_catalog(json: Value) -> Result<Vec<CatalogEntry>> {
    let items = match json {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("course") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(Error::Fetch(
                    "Catalog payload has no course array".to_string(),
                ))
            }
        },
        _ => return Err(Error::Fetch("Catalog payload is not a collection".to_string())),
    };

    items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item)
                .map_err(|e| Error::Fetch(format!("Malformed catalog entry: {}", e)))
        })
        .collect()
}

/// Case-insensitive substring filter over the four name fields
///
/// An empty query returns every entry. Relative catalog order is preserved.
/// The result is NOT truncated here; callers apply [`CATALOG_PAGE_SIZE`].
pub fn filter_catalog<'a>(entries: &'a [CatalogEntry], query: &str) -> Vec<&'a CatalogEntry> {
    if query.is_empty() {
        return entries.iter().collect();
    }

    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|entry| {
            entry.university_name_en.to_lowercase().contains(&needle)
                || entry.program_name_en.to_lowercase().contains(&needle)
                || entry.university_name_th.to_lowercase().contains(&needle)
                || entry.program_name_th.to_lowercase().contains(&needle)
        })
        .collect()
}
