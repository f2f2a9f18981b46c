// file: src/models/document.rs
// description: root content document with default content, shape checks, and view queries
// reference: internal data structures

use crate::models::project::{Category, Project};
use crate::models::site::{ContactInfo, SiteProfile};
use crate::models::staff::StaffCredit;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// The single persisted aggregate: every save replaces it wholesale and every
/// load returns it whole. There is no partial patch, merge, or version tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDocument {
    pub projects: Vec<Project>,
    pub staff: Vec<StaffCredit>,
    // Older stored documents used "content" for the site profile.
    #[serde(alias = "content")]
    pub site: SiteProfile,
}

/// One row of the combined chronological view over projects and staff credits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub year: String,
    pub title: String,
    pub role: String,
    pub kind: TimelineKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineKind {
    Project,
    Staff,
}

impl ContentDocument {
    /// Built-in default document used whenever no backend is configured or the
    /// stored copy is missing or malformed.
    pub fn initial() -> Self {
        Self {
            projects: vec![Project {
                id: "1".to_string(),
                category: Category::Directing,
                year: "2023".to_string(),
                title_local: "밤의 파편".to_string(),
                title_alt: "Fragments of the Night".to_string(),
                genre: "Noir / Drama".to_string(),
                runtime: "24min".to_string(),
                role: "Director / Writer".to_string(),
                synopsis: "어둠이 가득한 도시에서 잃어버린 기억의 조각을 찾아 헤매는 남자의 이야기."
                    .to_string(),
                awards: vec![
                    "2023 서울독립영화제 상영작".to_string(),
                    "제25회 부산국제영화제 우수상".to_string(),
                ],
                main_image: "https://picsum.photos/id/10/1200/800".to_string(),
                stills: vec![
                    "https://picsum.photos/id/11/800/600".to_string(),
                    "https://picsum.photos/id/12/800/600".to_string(),
                ],
            }],
            staff: vec![
                StaffCredit {
                    id: "s1".to_string(),
                    year: "2024".to_string(),
                    project: "대형 프로젝트 A".to_string(),
                    role: "Camera Assistant".to_string(),
                    awards: vec![],
                },
                StaffCredit {
                    id: "s2".to_string(),
                    year: "2023".to_string(),
                    project: "단편 영화 B".to_string(),
                    role: "Lighting Staff".to_string(),
                    awards: vec![],
                },
            ],
            site: SiteProfile {
                name: "KIM DIRECTOR".to_string(),
                philosophy: "STILLNESS IN MOTION, SILENCE IN SOUND".to_string(),
                about_text: "영화적인 시각과 깊이 있는 탐구를 통해 인간의 내면을 포착합니다."
                    .to_string(),
                contact_title: "Let's collaborate on your next story".to_string(),
                home_bg_image: "https://picsum.photos/id/20/1920/1080?grayscale".to_string(),
                profile_image: "https://picsum.photos/id/64/400/400?grayscale".to_string(),
                contact: ContactInfo {
                    email: "director@example.com".to_string(),
                    phone: "+82 10-1234-5678".to_string(),
                    instagram: "https://instagram.com/director_portfolio".to_string(),
                    youtube: "https://youtube.com/@director".to_string(),
                },
            },
        }
    }

    /// Minimal structural check on an untyped payload before deserializing:
    /// a `projects` array plus a site-profile-bearing field. Anything less is
    /// treated as a missing document, not a hard failure.
    pub fn has_valid_shape(value: &serde_json::Value) -> bool {
        let Some(obj) = value.as_object() else {
            return false;
        };
        let projects_ok = obj.get("projects").map(|v| v.is_array()).unwrap_or(false);
        let site_ok = obj
            .get("site")
            .or_else(|| obj.get("content"))
            .map(|v| v.is_object())
            .unwrap_or(false);
        projects_ok && site_ok
    }

    /// Removes the project with the given id by filtering it out. Order and
    /// fields of the remaining entries are untouched. Returns whether an
    /// entry was removed.
    pub fn remove_project(&mut self, id: &str) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        self.projects.len() != before
    }

    pub fn remove_staff(&mut self, id: &str) -> bool {
        let before = self.staff.len();
        self.staff.retain(|s| s.id != id);
        self.staff.len() != before
    }

    /// Projects filed under `category`, in original document order.
    pub fn projects_in(&self, category: Category) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    pub fn project_by_id(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Combined projects and staff credits sorted by `year` descending using
    /// plain string comparison. The string sort is intentional original
    /// behavior: four-digit years order correctly, anything else follows
    /// lexicographic order. Stable within equal years.
    pub fn timeline(&self) -> Vec<TimelineEntry> {
        let mut entries: Vec<TimelineEntry> = self
            .projects
            .iter()
            .map(|p| TimelineEntry {
                year: p.year.clone(),
                title: p.title_alt.clone(),
                role: p.role.clone(),
                kind: TimelineKind::Project,
            })
            .chain(self.staff.iter().map(|s| TimelineEntry {
                year: s.year.clone(),
                title: s.project.clone(),
                role: s.role.clone(),
                kind: TimelineKind::Staff,
            }))
            .collect();

        entries.sort_by(|a, b| b.year.cmp(&a.year));
        entries
    }
}

/// Identifier for a new project or staff credit: millisecond timestamp plus a
/// short random suffix. Uniqueness within the document is the caller's
/// responsibility; the model does not enforce it.
pub fn fresh_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", Utc::now().timestamp_millis(), &suffix[..6])
}

/// SHA-256 over the compact serialization, used to detect unchanged documents
/// without field-by-field comparison.
pub fn content_hash(doc: &ContentDocument) -> String {
    let bytes = serde_json::to_vec(doc).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    format!("{:x}", hasher.finalize())
}
