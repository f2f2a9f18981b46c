// file: src/utils/validation.rs
// description: data validation utilities and passphrase gate
// reference: input validation patterns

use crate::error::{FolioError, Result};
use crate::models::ContentDocument;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap();
    static ref URL_PATTERN: Regex = Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap();
}

pub struct Validator;

impl Validator {
    pub fn validate_email(email: &str) -> Result<()> {
        if EMAIL_PATTERN.is_match(email) {
            Ok(())
        } else {
            Err(FolioError::Validation(format!(
                "Invalid email address: {}",
                email
            )))
        }
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if URL_PATTERN.is_match(url) {
            Ok(())
        } else {
            Err(FolioError::Validation(format!("Invalid URL format: {}", url)))
        }
    }

    pub fn validate_payload_size(size: usize, limit: usize) -> Result<()> {
        if size > limit {
            Err(FolioError::Capacity { size, limit })
        } else {
            Ok(())
        }
    }

    /// Shared-passphrase gate for mutating commands. Checked client-side and
    /// explicitly not a security boundary. No configured passphrase means the
    /// gate is open.
    pub fn verify_passphrase(expected: Option<&str>, provided: Option<&str>) -> Result<()> {
        let Some(expected) = expected else {
            return Ok(());
        };

        let provided = provided.ok_or_else(|| {
            FolioError::Unauthorized("passphrase required, pass --passphrase".to_string())
        })?;

        let matches = expected.len() == provided.len()
            && expected
                .bytes()
                .zip(provided.bytes())
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0;

        if matches {
            Ok(())
        } else {
            Err(FolioError::Unauthorized("wrong passphrase".to_string()))
        }
    }

    /// Advisory lint over a document before push. The model itself enforces
    /// nothing (matching the original), so problems are reported, not fatal.
    pub fn document_issues(doc: &ContentDocument) -> Vec<String> {
        let mut issues = Vec::new();

        if Self::validate_email(&doc.site.contact.email).is_err() {
            issues.push(format!(
                "contact email looks malformed: {}",
                doc.site.contact.email
            ));
        }
        for (label, url) in [
            ("instagram", &doc.site.contact.instagram),
            ("youtube", &doc.site.contact.youtube),
        ] {
            if !url.is_empty() && Self::validate_url(url).is_err() {
                issues.push(format!("{} link looks malformed: {}", label, url));
            }
        }

        let mut seen = std::collections::HashSet::new();
        for project in &doc.projects {
            if !seen.insert(project.id.as_str()) {
                issues.push(format!("duplicate project id: {}", project.id));
            }
            if project.main_image.is_empty() {
                issues.push(format!("project {} has no main image", project.id));
            }
        }

        issues
    }
}
