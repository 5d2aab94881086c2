//! Program detail client
//!
//! Hydrates one program: fetches the detail payload and the admission-round
//! payload concurrently from the object store, then merges in the catalog
//! identity fields supplied by the caller. The remote payloads do not carry
//! `university_id`/`university_name_th` reliably, so the caller's metadata
//! always wins over same-named remote fields.
//!
//! Each payload may be a bare JSON object or a one-element array wrapping
//! it; the array case is unwrapped by taking its first element. No caching:
//! every call re-fetches.

use crate::types::{CatalogMeta, ProgramDetail};
use serde_json::Value;
use std::time::Duration;
use uniplan_common::{Error, Result};

const USER_AGENT: &str = "uniplan/0.1.0";

/// Object-store client for program detail and round payloads
pub struct DetailClient {
    http_client: reqwest::Client,
    asset_base_url: String,
}

impl DetailClient {
    /// Create new detail client for the given object-store base URL
    pub fn new(asset_base_url: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Fetch(e.to_string()))?;

        let mut asset_base_url = asset_base_url.into();
        while asset_base_url.ends_with('/') {
            asset_base_url.pop();
        }

        Ok(Self {
            http_client,
            asset_base_url,
        })
    }

    /// Fetch and merge detail + round payloads for one program
    pub async fn hydrate(&self, program_id: &str, meta: &CatalogMeta) -> Result<ProgramDetail> {
        let detail_url = format!("{}/ly-programs/{}.json", self.asset_base_url, program_id);
        let round_url = format!("{}/rounds/{}.json", self.asset_base_url, program_id);

        tracing::debug!(program_id = %program_id, "Hydrating program detail");

        // Both fetches run concurrently; both must succeed before any merge
        let (detail_json, round_json) = tokio::join!(
            self.fetch_json(&detail_url),
            self.fetch_json(&round_url)
        );

        merge_detail(detail_json?, round_json?, meta)
    }

    async fn fetch_json(&self, url: &str) -> Result<Value> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!(
                "GET {} returned HTTP {}",
                url,
                status.as_u16()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Fetch(format!("Payload from {} is not JSON: {}", url, e)))
    }
}

/// Unwrap the object-or-one-element-array payload convention
fn unwrap_payload(json: Value) -> Result<Value> {
    match json {
        Value::Array(mut items) => {
            if items.is_empty() {
                return Err(Error::Fetch("Payload array is empty".to_string()));
            }
            Ok(items.remove(0))
        }
        other @ Value::Object(_) => Ok(other),
        _ => Err(Error::Fetch("Payload is not an object".to_string())),
    }
}

/// Merge a detail payload with round info and caller-supplied catalog meta
///
/// Field precedence: remote detail fields first, then `university_id` and
/// `university_name_th` from `meta` (caller always wins), then the round
/// payload attached whole.
pub fn merge_detail(
    detail_json: Value,
    round_json: Value,
    meta: &CatalogMeta,
) -> Result<ProgramDetail> {
    let detail_json = unwrap_payload(detail_json)?;
    let round_json = unwrap_payload(round_json)?;

    let mut detail: ProgramDetail = serde_json::from_value(detail_json)
        .map_err(|e| Error::Fetch(format!("Malformed detail payload: {}", e)))?;

    detail.university_id = meta.university_id.clone();
    detail.university_name_th = meta.university_name_th.clone();
    detail.round = Some(round_json);

    Ok(detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta() -> CatalogMeta {
        CatalogMeta {
            university_id: "001".to_string(),
            university_name_th: "จุฬาฯ".to_string(),
        }
    }

    #[test]
    fn test_merge_caller_meta_wins() {
        // Remote payload carries different identity fields; they must lose
        let detail = json!({
            "program_id": "p1",
            "program_name_th": "เคมี",
            "university_id": "999",
            "university_name_th": "ไม่ใช่",
            "min_score": 40.0,
            "max_score": 80.0
        });
        let round = json!({"round_3": {"quota": 50}});

        let merged = merge_detail(detail, round, &meta()).unwrap();
        assert_eq!(merged.university_id, "001");
        assert_eq!(merged.university_name_th, "จุฬาฯ");
        assert_eq!(merged.round, Some(json!({"round_3": {"quota": 50}})));
    }

    #[test]
    fn test_merge_unwraps_one_element_arrays() {
        let detail = json!([{"program_id": "p1", "min_score": 10.0, "max_score": 20.0}]);
        let round = json!([{"round_3": {}}]);

        let merged = merge_detail(detail, round, &meta()).unwrap();
        assert_eq!(merged.program_id, "p1");
        assert_eq!(merged.round, Some(json!({"round_3": {}})));
    }

    #[test]
    fn test_merge_rejects_empty_array_payload() {
        let err = merge_detail(json!([]), json!({}), &meta()).unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
    }

    #[test]
    fn test_merge_rejects_scalar_payload() {
        let err = merge_detail(json!("oops"), json!({}), &meta()).unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
    }
}
