// file: src/models/staff.rs
// description: staff credit model for crew work on external productions
// reference: internal data structures

use serde::{Deserialize, Serialize};

/// One crew credit. `project` is the free-text name of the production, not a
/// reference to any `Project.id` in the same document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffCredit {
    pub id: String,
    pub year: String,
    pub project: String,
    pub role: String,
    pub awards: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_staff_credit_round_trip() {
        let credit = StaffCredit {
            id: "s1".to_string(),
            year: "2024".to_string(),
            project: "Feature Project A".to_string(),
            role: "Camera Assistant".to_string(),
            awards: vec![],
        };
        let json = serde_json::to_string(&credit).unwrap();
        let back: StaffCredit = serde_json::from_str(&json).unwrap();
        assert_eq!(credit, back);
    }
}
