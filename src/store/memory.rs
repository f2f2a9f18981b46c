// file: src/store/memory.rs
// description: in-process document store for tests and ephemeral runs
// reference: internal adapter implementation

use crate::error::Result;
use crate::image::ImageEncoder;
use crate::models::ContentDocument;
use crate::store::DocumentStore;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Holds the document in memory. Nothing survives the process; useful for
/// tests and for exercising the adapter seam without any configuration.
pub struct MemoryStore {
    document: RwLock<Option<ContentDocument>>,
    encoder: ImageEncoder,
}

impl MemoryStore {
    pub fn new(encoder: ImageEncoder) -> Self {
        Self {
            document: RwLock::new(None),
            encoder,
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<bool> {
        Ok(true)
    }

    async fn load_document(&self) -> Result<Option<ContentDocument>> {
        Ok(self.document.read().await.clone())
    }

    async fn save_document(&self, doc: &ContentDocument) -> Result<()> {
        *self.document.write().await = Some(doc.clone());
        Ok(())
    }

    async fn upload_image(&self, bytes: &[u8], _filename: &str) -> Result<String> {
        self.encoder.encode_to_data_uri(bytes)
    }
}
