// file: src/store/local.rs
// description: JSON-file document store, the browser-local storage analog
// reference: internal adapter implementation

use crate::error::{FolioError, Result};
use crate::image::ImageEncoder;
use crate::models::ContentDocument;
use crate::store::DocumentStore;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Persists the document as one JSON file on disk. Always "configured" in the
/// sense of the adapter contract; a missing file is simply an absent document.
/// Uploads are compressed client-side into data URIs, there is no blob store.
pub struct LocalStore {
    path: PathBuf,
    encoder: ImageEncoder,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>, encoder: ImageEncoder) -> Self {
        Self {
            path: path.into(),
            encoder,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DocumentStore for LocalStore {
    fn backend_name(&self) -> &'static str {
        "local"
    }

    async fn ping(&self) -> Result<bool> {
        Ok(true)
    }

    async fn load_document(&self) -> Result<Option<ContentDocument>> {
        if !self.path.exists() {
            debug!("No document at {}", self.path.display());
            return Ok(None);
        }

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FolioError::FileOperation {
                path: self.path.clone(),
                source: e,
            })?;

        let value: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("Document at {} is not JSON: {}", self.path.display(), e);
                return Ok(None);
            }
        };

        if !ContentDocument::has_valid_shape(&value) {
            warn!(
                "Document at {} failed shape check, treating as absent",
                self.path.display()
            );
            return Ok(None);
        }

        // A payload that passes the shape check can still fail typed decoding
        // (unknown category, missing field). That is a validation failure, not
        // a fatal one: treat it as absent so the caller substitutes defaults.
        match serde_json::from_value(value) {
            Ok(doc) => Ok(Some(doc)),
            Err(e) => {
                warn!(
                    "Document at {} does not decode, treating as absent: {}",
                    self.path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    async fn save_document(&self, doc: &ContentDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| FolioError::FileOperation {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let serialized = serde_json::to_string_pretty(doc)?;
        tokio::fs::write(&self.path, serialized)
            .await
            .map_err(|e| FolioError::FileOperation {
                path: self.path.clone(),
                source: e,
            })?;

        debug!("Wrote document to {}", self.path.display());
        Ok(())
    }

    async fn upload_image(&self, bytes: &[u8], _filename: &str) -> Result<String> {
        self.encoder.encode_to_data_uri(bytes)
    }
}
