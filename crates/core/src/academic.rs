//! Read-only academic reference types: classes and roster entries.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// A class (grade + section) used to scope an attendance sheet.
///
/// Owned by the backend; the dashboard only ever reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRef {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub name: String,
    pub grade: i32,
    pub section: String,
}

/// A roster entry for one student of a class.
///
/// Fetched fresh whenever the class selection changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRef {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub roll_number: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_ref_maps_mongo_id() {
        let json = r#"{"_id":"c1","name":"Grade 5 - A","grade":5,"section":"A"}"#;
        let class: ClassRef = serde_json::from_str(json).unwrap();
        assert_eq!(class.id, "c1");
        assert_eq!(class.grade, 5);
        assert_eq!(class.section, "A");
    }

    #[test]
    fn student_ref_deserializes_roster_row() {
        let json = r#"{
            "_id": "s1",
            "rollNumber": "05A-17",
            "firstName": "Anil",
            "lastName": "Sharma",
            "isActive": true
        }"#;
        let student: StudentRef = serde_json::from_str(json).unwrap();
        assert_eq!(student.id, "s1");
        assert_eq!(student.roll_number, "05A-17");
        assert!(student.is_active);
    }

    #[test]
    fn student_ref_tolerates_missing_is_active() {
        let json = r#"{"_id":"s2","rollNumber":"1","firstName":"A","lastName":"B"}"#;
        let student: StudentRef = serde_json::from_str(json).unwrap();
        assert!(student.is_active);
    }
}
