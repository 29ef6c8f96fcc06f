use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::collect::error::CollectError;
use crate::geometric::element::Element;

/// Overpass JSON response, reduced to what the pipeline reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverpassPayload {
    pub elements: Vec<Element>,
    /// Runtime notice Overpass attaches on timeouts or memory exhaustion
    #[serde(default)]
    pub remark: Option<String>,
}

impl OverpassPayload {
    /// Validate an already-parsed JSON document
    pub fn from_value(value: serde_json::Value) -> Result<Self, CollectError> {
        if value.get("elements").is_none() {
            return Err(CollectError::data_format("missing 'elements'"));
        }

        let payload: OverpassPayload = serde_json::from_value(value)
            .map_err(|e| CollectError::data_format(format!("malformed elements ({})", e)))?;

        if let Some(ref remark) = payload.remark {
            warn!(remark = %remark, "Overpass returned a remark, result may be incomplete");
        }
        Ok(payload)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, CollectError> {
        let value: serde_json::Value = serde_json::from_slice(bytes)
            .map_err(|e| CollectError::data_format(format!("invalid JSON ({})", e)))?;
        Self::from_value(value)
    }

    /// Load a payload saved from a previous Overpass query
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CollectError> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading offline Overpass payload");
        let bytes = fs::read(path).map_err(|e| CollectError::SourceUnavailable {
            failures: vec![format!(
                "Offline payload not readable: {} ({})",
                path.display(),
                e
            )],
        })?;
        Self::from_slice(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_payload_from_slice() {
        let json = br#"{
            "version": 0.6,
            "elements": [
                {"type": "node", "id": 1, "lat": 0.0, "lon": 0.0},
                {"type": "way", "id": 2, "nodes": [1], "tags": {"building": "yes"}}
            ]
        }"#;
        let payload = OverpassPayload::from_slice(json).unwrap();
        assert_eq!(payload.elements.len(), 2);
        assert!(payload.remark.is_none());
    }

    #[test]
    fn test_missing_elements_is_data_format_error() {
        let err = OverpassPayload::from_slice(br#"{"version": 0.6}"#).unwrap_err();
        assert!(matches!(err, CollectError::DataFormat { .. }));
        assert!(err.to_string().contains("missing 'elements'"));
    }

    #[test]
    fn test_malformed_element_is_data_format_error() {
        let json = br#"{"elements": [{"type": "node", "id": "x"}]}"#;
        let err = OverpassPayload::from_slice(json).unwrap_err();
        assert!(matches!(err, CollectError::DataFormat { .. }));
    }

    #[test]
    fn test_remark_is_kept() {
        let json = br#"{"elements": [], "remark": "runtime error: Query timed out"}"#;
        let payload = OverpassPayload::from_slice(json).unwrap();
        assert!(payload.elements.is_empty());
        assert_eq!(
            payload.remark.as_deref(),
            Some("runtime error: Query timed out")
        );
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"elements": [{{"type": "node", "id": 5, "lat": 1.5, "lon": 2.5}}]}}"#
        )
        .unwrap();
        let payload = OverpassPayload::from_file(file.path()).unwrap();
        assert_eq!(payload.elements, vec![Element::node(5, 1.5, 2.5)]);
    }

    #[test]
    fn test_from_missing_file() {
        let err = OverpassPayload::from_file("/nonexistent/payload.json").unwrap_err();
        assert!(matches!(err, CollectError::SourceUnavailable { .. }));
    }
}
