//! Shared types for the uniplan-ui module
//!
//! `CatalogEntry` mirrors one record of the static catalog snapshot; the
//! snapshot stores every field as a string. `ProgramDetail` models the
//! remote detail payload, which carries a typed core plus an open-ended set
//! of extra fields that are passed through untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One record of the static program catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub university_id: String,
    pub university_name_th: String,
    pub university_name_en: String,
    pub program_id: String,
    pub program_name_th: String,
    pub program_name_en: String,
    #[serde(default)]
    pub cost: String,
    #[serde(default)]
    pub graduate_rate: String,
    #[serde(default)]
    pub employment_rate: String,
    #[serde(default)]
    pub median_salary: String,
    #[serde(default)]
    pub program_type_id: String,
}

/// Catalog metadata merged into a hydrated detail
///
/// The remote detail payload does not carry identity fields reliably, so
/// the caller supplies them from the catalog and they always win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogMeta {
    pub university_id: String,
    pub university_name_th: String,
}

impl CatalogMeta {
    pub fn from_entry(entry: &CatalogEntry) -> Self {
        Self {
            university_id: entry.university_id.clone(),
            university_name_th: entry.university_name_th.clone(),
        }
    }
}

/// Hydrated program detail: remote payload plus catalog identity fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramDetail {
    pub program_id: String,
    #[serde(default)]
    pub program_name_th: String,
    #[serde(default)]
    pub university_id: String,
    #[serde(default)]
    pub university_name_th: String,
    #[serde(default)]
    pub min_score: f64,
    #[serde(default)]
    pub max_score: f64,

    /// Subject key -> percent weight; remote values may be numbers or
    /// numeric strings, so they are kept raw and read via [`weight_percent`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<BTreeMap<String, Value>>,

    /// Admission-round info attached during hydration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round: Option<Value>,

    /// Remaining remote fields, carried through opaquely
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Parse a score weight value into a percent clamped to 0..=100
///
/// The snapshot data is inconsistent about numeric types: weights appear
/// both as JSON numbers and as numeric strings.
pub fn weight_percent(value: &Value) -> Option<f64> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    Some(clamp_percent(raw))
}

/// Clamp a score to the 0..=100 range used by the score bar
pub fn clamp_percent(score: f64) -> f64 {
    score.clamp(0.0, 100.0)
}
