// file: src/models/site.rs
// description: site-wide profile and contact models
// reference: internal data structures

use serde::{Deserialize, Serialize};

/// Site-wide text and imagery shown outside the project/staff listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteProfile {
    pub name: String,
    pub philosophy: String,
    pub about_text: String,
    pub contact_title: String,
    pub home_bg_image: String,
    pub profile_image: String,
    pub contact: ContactInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub instagram: String,
    pub youtube: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_profile_camel_case_keys() {
        let profile = SiteProfile {
            name: "KIM DIRECTOR".to_string(),
            philosophy: "STILLNESS IN MOTION".to_string(),
            about_text: "About.".to_string(),
            contact_title: "Let's collaborate".to_string(),
            home_bg_image: "https://example.com/bg.jpg".to_string(),
            profile_image: "https://example.com/me.jpg".to_string(),
            contact: ContactInfo {
                email: "director@example.com".to_string(),
                phone: "+82 10-1234-5678".to_string(),
                instagram: "https://instagram.com/director".to_string(),
                youtube: "https://youtube.com/@director".to_string(),
            },
        };
        let value = serde_json::to_value(&profile).unwrap();
        assert!(value.get("aboutText").is_some());
        assert!(value.get("homeBgImage").is_some());
        assert!(value.get("about_text").is_none());
    }
}
