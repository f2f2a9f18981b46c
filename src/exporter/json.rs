// file: src/exporter/json.rs
// description: json export utilities for the content document

use crate::error::Result;
use crate::models::{ContentDocument, content_hash};
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct DocumentExporter {
    output_dir: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub content_hash: String,
    pub projects: usize,
    pub staff: usize,
    pub files: Vec<String>,
}

impl DocumentExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    /// Writes the document plus a manifest describing the export. Returns the
    /// manifest so the caller can report what was written.
    pub fn export(&self, doc: &ContentDocument, pretty: bool) -> Result<ExportManifest> {
        let document_file = "portfolio.json".to_string();
        let serialized = if pretty {
            serde_json::to_string_pretty(doc)?
        } else {
            serde_json::to_string(doc)?
        };
        fs::write(self.output_dir.join(&document_file), serialized)?;

        let manifest = ExportManifest {
            exported_at: Utc::now().to_rfc3339(),
            content_hash: content_hash(doc),
            projects: doc.projects.len(),
            staff: doc.staff.len(),
            files: vec![document_file, "manifest.json".to_string()],
        };
        fs::write(
            self.output_dir.join("manifest.json"),
            serde_json::to_string_pretty(&manifest)?,
        )?;

        info!(
            "Exported document ({} projects, {} staff) to {}",
            manifest.projects,
            manifest.staff,
            self.output_dir.display()
        );
        Ok(manifest)
    }
}
