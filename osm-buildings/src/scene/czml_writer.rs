use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{create_dir_all, write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::collect::global_variables::{get_czml_path, CZML_MANIFEST_NAME};
use crate::scene::czml::ScenePacketDocument;

#[derive(Serialize)]
struct Manifest<'a> {
    files: &'a [String],
}

/// Persists scene documents as `way_<id>.czml` files plus a manifest
pub struct CzmlWriter {
    output_path: PathBuf,
}

impl CzmlWriter {
    /// Defaults to `czml_output` under the working directory
    pub fn new(output_path: Option<String>) -> Self {
        CzmlWriter {
            output_path: output_path.map(PathBuf::from).unwrap_or_else(get_czml_path),
        }
    }

    pub fn get_output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn file_name(way_id: i64) -> String {
        format!("way_{}.czml", way_id)
    }

    /// Write every document, then the manifest when at least one file exists
    /// Returns the file names in input order
    pub fn write_all<'a, I>(&self, documents: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = (i64, &'a ScenePacketDocument)>,
    {
        create_dir_all(&self.output_path).with_context(|| {
            format!(
                "Failed to create CZML directory {}",
                self.output_path.display()
            )
        })?;

        let mut files = Vec::new();
        for (way_id, document) in documents {
            let name = Self::file_name(way_id);
            let path = self.output_path.join(&name);
            write(&path, document.to_json_pretty()?)
                .with_context(|| format!("Failed to write CZML file: {}", path.display()))?;
            files.push(name);
        }

        if !files.is_empty() {
            let manifest_path = self.output_path.join(CZML_MANIFEST_NAME);
            let mut manifest = serde_json::to_string_pretty(&Manifest { files: &files })
                .context("Failed to serialize CZML manifest")?;
            manifest.push('\n');
            write(&manifest_path, manifest).with_context(|| {
                format!("Failed to write manifest: {}", manifest_path.display())
            })?;
        }

        info!(
            count = files.len(),
            directory = %self.output_path.display(),
            "CZML documents written"
        );
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo_core::Coordinate;
    use crate::scene::czml::build_scene_document;

    fn document(way_id: i64) -> ScenePacketDocument {
        let outline = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(0.0, 0.0),
        ];
        build_scene_document(way_id, &outline, Some(6.0))
    }

    #[test]
    fn test_write_documents_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("czml");
        let writer = CzmlWriter::new(Some(out.to_string_lossy().to_string()));

        let a = document(7);
        let b = document(3);
        let files = writer.write_all([(7, &a), (3, &b)]).unwrap();
        assert_eq!(files, vec!["way_7.czml", "way_3.czml"]);

        let written = std::fs::read_to_string(out.join("way_7.czml")).unwrap();
        assert_eq!(written, a.to_json_pretty().unwrap());
        let parsed: ScenePacketDocument = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, a);

        let manifest: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out.join(CZML_MANIFEST_NAME)).unwrap())
                .unwrap();
        assert_eq!(
            manifest,
            serde_json::json!({"files": ["way_7.czml", "way_3.czml"]})
        );
    }

    #[test]
    fn test_no_manifest_without_documents() {
        let dir = tempfile::tempdir().unwrap();
        let writer = CzmlWriter::new(Some(dir.path().to_string_lossy().to_string()));
        let files = writer.write_all(std::iter::empty::<(i64, &ScenePacketDocument)>()).unwrap();
        assert!(files.is_empty());
        assert!(!dir.path().join(CZML_MANIFEST_NAME).exists());
    }

    #[test]
    fn test_default_output_path() {
        let writer = CzmlWriter::new(None);
        assert_eq!(writer.get_output_path(), Path::new("czml_output"));
    }
}
