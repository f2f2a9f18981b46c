// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod image;
pub mod models;
pub mod progress;
pub mod store;
pub mod utils;

pub use config::{
    AdminConfig, BackendConfig, BackendKind, Config, DocBinConfig, DocumentConfig, ImageConfig,
    SupabaseConfig,
};
pub use error::{FolioError, Result};
pub use exporter::{DocumentExporter, ExportManifest};
pub use image::ImageEncoder;
pub use models::{
    Category, ContactInfo, ContentDocument, Project, SiteProfile, StaffCredit, TimelineEntry,
    TimelineKind, content_hash, fresh_id,
};
pub use progress::{UploadStats, UploadTracker};
pub use store::{
    DocBinStore, DocumentStore, LoadOutcome, LocalStore, MemoryStore, SupabaseStore,
    load_or_default, resolve_store,
};
pub use utils::Validator;
