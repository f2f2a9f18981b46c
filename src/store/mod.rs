// file: src/store/mod.rs
// description: document store trait, backend resolution, and load orchestration
// reference: adapter seam over swappable storage backends

pub mod docbin;
pub mod local;
pub mod memory;
pub mod supabase;

pub use docbin::DocBinStore;
pub use local::LocalStore;
pub use memory::MemoryStore;
pub use supabase::SupabaseStore;

use crate::config::{BackendKind, Config};
use crate::error::Result;
use crate::models::ContentDocument;
use async_trait::async_trait;
use tracing::{info, warn};

/// The complete persistence contract. The view layer and CLI depend on this
/// trait alone; nothing outside this module may touch backend specifics.
///
/// Load contract: `Ok(None)` means the backend is reachable but holds no
/// usable document (absent or failed the shape check). An unreachable backend
/// is `Err(Connectivity)`, never a silent `None`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    fn backend_name(&self) -> &'static str;

    /// Cheap reachability probe, used by `status` before any real operation.
    async fn ping(&self) -> Result<bool>;

    async fn load_document(&self) -> Result<Option<ContentDocument>>;

    /// Replaces the stored copy with the entire document, last write wins.
    /// Never mutates the caller's copy. Backends with a payload ceiling check
    /// the serialized size before any network round-trip.
    async fn save_document(&self, doc: &ContentDocument) -> Result<()>;

    /// Stores one image and returns a reference usable in any image field:
    /// either a fetchable URL or a self-contained data URI.
    async fn upload_image(&self, bytes: &[u8], filename: &str) -> Result<String>;
}

/// How a document was obtained by [`load_or_default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No backend configured; built-in default, no network call attempted.
    NotConfigured,
    /// Loaded from the configured backend.
    Remote,
    /// Backend had no usable document; default substituted and written back.
    Seeded,
}

/// Builds the concrete store for the active configuration, resolved once at
/// startup. Absent credentials resolve to `None` with an informational log,
/// never an error; "apply new settings" means calling this again with a new
/// `Config`.
pub fn resolve_store(config: &Config) -> Option<Box<dyn DocumentStore>> {
    match config.backend.kind {
        BackendKind::None => {
            info!("No backend configured, running on built-in defaults");
            None
        }
        BackendKind::Local => Some(Box::new(LocalStore::new(
            config.document.local_path.clone(),
            crate::image::ImageEncoder::from_config(&config.image),
        ))),
        BackendKind::Memory => Some(Box::new(MemoryStore::new(
            crate::image::ImageEncoder::from_config(&config.image),
        ))),
        BackendKind::DocBin => {
            let docbin = &config.backend.docbin;
            match (docbin.bin_id.as_deref(), docbin.master_key.as_deref()) {
                (Some(bin_id), Some(master_key)) if !bin_id.is_empty() && !master_key.is_empty() => {
                    Some(Box::new(DocBinStore::new(
                        docbin.base_url.clone(),
                        bin_id.to_string(),
                        master_key.to_string(),
                        config.document.max_payload_bytes,
                        crate::image::ImageEncoder::from_config(&config.image),
                    )))
                }
                _ => {
                    info!("Document-bin credentials not set, cloud sync disabled");
                    None
                }
            }
        }
        BackendKind::Supabase => {
            let supabase = &config.backend.supabase;
            match (supabase.url.as_deref(), supabase.anon_key.as_deref()) {
                (Some(url), Some(anon_key)) if !url.is_empty() && !anon_key.is_empty() => {
                    Some(Box::new(SupabaseStore::new(
                        url.to_string(),
                        anon_key.to_string(),
                        supabase.table.clone(),
                        supabase.row_id.clone(),
                        supabase.bucket.clone(),
                    )))
                }
                _ => {
                    info!("Supabase credentials not set, cloud sync disabled");
                    None
                }
            }
        }
    }
}

/// Boot-time load: default document when unconfigured, remote document when
/// present, otherwise seed the default into the backend so the next load
/// succeeds. Connectivity failures propagate so the caller can show a
/// disconnected banner instead of silently serving defaults.
pub async fn load_or_default(
    store: Option<&dyn DocumentStore>,
) -> Result<(ContentDocument, LoadOutcome)> {
    let Some(store) = store else {
        return Ok((ContentDocument::initial(), LoadOutcome::NotConfigured));
    };

    match store.load_document().await? {
        Some(doc) => Ok((doc, LoadOutcome::Remote)),
        None => {
            let doc = ContentDocument::initial();
            // Best-effort write-back; a failed seed must not break the read path.
            if let Err(e) = store.save_document(&doc).await {
                warn!(
                    "Could not seed default document into {}: {}",
                    store.backend_name(),
                    e
                );
            }
            Ok((doc, LoadOutcome::Seeded))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_unconfigured_load_yields_default_without_store() {
        let (doc, outcome) = load_or_default(None).await.unwrap();
        assert_eq!(outcome, LoadOutcome::NotConfigured);
        assert_eq!(doc, ContentDocument::initial());
    }

    #[tokio::test]
    async fn test_empty_backend_is_seeded_with_default() {
        let store = MemoryStore::new(crate::image::ImageEncoder::new(1000, 70));
        let store: &dyn DocumentStore = &store;
        let (doc, outcome) = load_or_default(Some(store)).await.unwrap();
        assert_eq!(outcome, LoadOutcome::Seeded);
        assert_eq!(doc, ContentDocument::initial());

        // The write-back makes the next load a plain remote hit.
        let (_, outcome) = load_or_default(Some(store)).await.unwrap();
        assert_eq!(outcome, LoadOutcome::Remote);
    }

    #[tokio::test]
    async fn test_malformed_backend_payload_falls_back_and_writes_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.json");
        std::fs::write(&path, r#"{"schedule": []}"#).unwrap();

        let store = LocalStore::new(&path, crate::image::ImageEncoder::new(1000, 70));
        let store: &dyn DocumentStore = &store;

        let (doc, outcome) = load_or_default(Some(store)).await.unwrap();
        assert_eq!(outcome, LoadOutcome::Seeded);
        assert_eq!(doc, ContentDocument::initial());

        // The corrective write-back replaced the malformed file.
        let (_, outcome) = load_or_default(Some(store)).await.unwrap();
        assert_eq!(outcome, LoadOutcome::Remote);
    }

    #[tokio::test]
    async fn test_undecodable_backend_payload_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.json");

        // Passes the shape check but fails typed decoding on the category.
        let mut value = serde_json::to_value(ContentDocument::initial()).unwrap();
        value["projects"][0]["category"] = serde_json::json!("DOCUMENTARY");
        std::fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();

        let store = LocalStore::new(&path, crate::image::ImageEncoder::new(1000, 70));
        let store: &dyn DocumentStore = &store;

        let (doc, outcome) = load_or_default(Some(store)).await.unwrap();
        assert_eq!(outcome, LoadOutcome::Seeded);
        assert_eq!(doc, ContentDocument::initial());

        let (_, outcome) = load_or_default(Some(store)).await.unwrap();
        assert_eq!(outcome, LoadOutcome::Remote);
    }

    #[test]
    fn test_resolution_without_credentials_is_none_not_error() {
        let mut config = Config::default_config();
        config.backend.kind = crate::config::BackendKind::DocBin;
        assert!(resolve_store(&config).is_none());

        config.backend.kind = crate::config::BackendKind::Supabase;
        assert!(resolve_store(&config).is_none());

        config.backend.kind = crate::config::BackendKind::None;
        assert!(resolve_store(&config).is_none());
    }

    #[test]
    fn test_resolution_with_credentials_builds_store() {
        let mut config = Config::default_config();
        config.backend.kind = crate::config::BackendKind::DocBin;
        config.backend.docbin.bin_id = Some("abc".to_string());
        config.backend.docbin.master_key = Some("key".to_string());
        let store = resolve_store(&config).expect("store should resolve");
        assert_eq!(store.backend_name(), "docbin");

        config.backend.kind = crate::config::BackendKind::Supabase;
        config.backend.supabase.url = Some("https://proj.supabase.co".to_string());
        config.backend.supabase.anon_key = Some("anon".to_string());
        let store = resolve_store(&config).expect("store should resolve");
        assert_eq!(store.backend_name(), "supabase");
    }

    #[test]
    fn test_blank_credentials_treated_as_absent() {
        let mut config = Config::default_config();
        config.backend.kind = crate::config::BackendKind::DocBin;
        config.backend.docbin.bin_id = Some(String::new());
        config.backend.docbin.master_key = Some("key".to_string());
        assert!(resolve_store(&config).is_none());
    }
}
