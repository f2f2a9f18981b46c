// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod document;
pub mod project;
pub mod site;
pub mod staff;

pub use document::{ContentDocument, TimelineEntry, TimelineKind, content_hash, fresh_id};
pub use project::{Category, Project};
pub use site::{ContactInfo, SiteProfile};
pub use staff::StaffCredit;
