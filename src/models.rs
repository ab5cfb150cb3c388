//! Data types shared by the catalog, downloader, scanner and HTTP facade.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// One document advertised by the remote catalog.
///
/// The remote object is kept verbatim so it can be echoed back unchanged;
/// [`file_id`](Self::file_id) and [`filename`](Self::filename) read the two
/// fields the pipeline cares about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogEntry(Map<String, Value>);

impl CatalogEntry {
    pub fn new(file_id: impl Into<String>, filename: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert("file_id".to_string(), Value::String(file_id.into()));
        map.insert("filename".to_string(), Value::String(filename.into()));
        Self(map)
    }

    pub fn from_object(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn file_id(&self) -> Option<String> {
        self.0.get("file_id").and_then(file_id_from_json)
    }

    pub fn filename(&self) -> Option<&str> {
        self.0
            .get("filename")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Both a usable identifier and a non-empty filename are present.
    pub fn is_well_formed(&self) -> bool {
        self.file_id().is_some() && self.filename().is_some()
    }
}

/// Normalizes a JSON file identifier.
///
/// Non-empty strings and non-zero numbers are accepted; `null`, booleans,
/// zero, empty strings and containers are not.
pub fn file_id_from_json(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// A local document whose extracted text contains the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub file: String,
    pub snippet: String,
}

/// Outcome of downloading every catalog entry.
#[derive(Debug, Clone, Default)]
pub struct BulkDownload {
    /// Entries in the catalog, well-formed or not.
    pub catalog_len: usize,
    /// Local paths written, in catalog order.
    pub files: Vec<PathBuf>,
    /// Entries without a usable `file_id` or `filename`.
    pub skipped: usize,
    /// Well-formed entries whose download failed.
    pub failed: usize,
}

impl BulkDownload {
    pub fn catalog_was_empty(&self) -> bool {
        self.catalog_len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(value: Value) -> CatalogEntry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn numeric_file_id_is_accepted() {
        let e = entry(json!({"file_id": 42, "filename": "a.pdf"}));
        assert_eq!(e.file_id().as_deref(), Some("42"));
        assert!(e.is_well_formed());
    }

    #[test]
    fn empty_or_missing_fields_are_not_well_formed() {
        assert!(!entry(json!({"file_id": "", "filename": "a.pdf"})).is_well_formed());
        assert!(!entry(json!({"file_id": "1", "filename": ""})).is_well_formed());
        assert!(!entry(json!({"file_id": null, "filename": "a.pdf"})).is_well_formed());
        assert!(!entry(json!({"filename": "a.pdf"})).is_well_formed());
        assert!(!entry(json!({"file_id": "1", "filename": 7})).is_well_formed());
    }

    #[test]
    fn serializes_remote_object_unchanged() {
        let raw = json!({"file_id": "1", "filename": "a.pdf", "size": 1024});
        let e = entry(raw.clone());
        assert_eq!(serde_json::to_value(&e).unwrap(), raw);
    }

    #[test]
    fn zero_file_id_reads_as_missing() {
        assert_eq!(file_id_from_json(&json!(0)), None);
        assert_eq!(file_id_from_json(&json!(0.0)), None);
        assert_eq!(file_id_from_json(&json!(-3)).as_deref(), Some("-3"));
        assert!(!entry(json!({"file_id": 0, "filename": "a.pdf"})).is_well_formed());
    }

    #[test]
    fn file_id_rejects_booleans_and_containers() {
        assert_eq!(file_id_from_json(&json!(true)), None);
        assert_eq!(file_id_from_json(&json!(["1"])), None);
        assert_eq!(file_id_from_json(&json!({"id": 1})), None);
    }
}
