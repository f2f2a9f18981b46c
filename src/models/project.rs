// file: src/models/project.rs
// description: project entry model and category enum
// reference: internal data structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display category a project is filed under. An unknown value in a stored
/// document fails deserialization of that document; filters never match a
/// category that is not one of these three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Directing,
    AiFilm,
    Cinematography,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Directing, Category::AiFilm, Category::Cinematography];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Directing => "DIRECTING",
            Category::AiFilm => "AI_FILM",
            Category::Cinematography => "CINEMATOGRAPHY",
        };
        write!(f, "{}", label)
    }
}

/// One portfolio project. Sequence position in the document is display order.
///
/// `year` is free text used for display and descending string sort, not a
/// validated integer. Image fields hold either a fetchable URL or a
/// self-contained data URI; consumers must accept both forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub category: Category,
    pub year: String,
    pub title_local: String,
    pub title_alt: String,
    pub genre: String,
    pub runtime: String,
    pub role: String,
    pub synopsis: String,
    pub awards: Vec<String>,
    pub main_image: String,
    pub stills: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_category_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&Category::AiFilm).unwrap(),
            "\"AI_FILM\""
        );
        assert_eq!(
            serde_json::to_string(&Category::Directing).unwrap(),
            "\"DIRECTING\""
        );
    }

    #[test]
    fn test_unknown_category_rejected() {
        let result: Result<Category, _> = serde_json::from_str("\"DOCUMENTARY\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_project_round_trips_camel_case() {
        let json = r#"{
            "id": "1",
            "category": "DIRECTING",
            "year": "2023",
            "titleLocal": "밤의 파편",
            "titleAlt": "Fragments of the Night",
            "genre": "Noir / Drama",
            "runtime": "24min",
            "role": "Director / Writer",
            "synopsis": "…",
            "awards": [],
            "mainImage": "https://example.com/main.jpg",
            "stills": []
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.title_alt, "Fragments of the Night");
        assert_eq!(project.category, Category::Directing);

        let value = serde_json::to_value(&project).unwrap();
        assert!(value.get("titleLocal").is_some());
        assert!(value.get("mainImage").is_some());
        assert!(value.get("title_local").is_none());
    }
}
