//! Wire shapes for the backend REST API.
//!
//! The backend wraps every success body in `{"data": ...}` and camelCases
//! field names; Mongo-style `_id` keys are mapped via explicit renames.
//! Attendance GET rows arrive with the student populated as a nested object,
//! of which only `_id` matters here.

use campus_core::types::EntityId;
use campus_core::{AttendanceRecord, AttendanceStatus, ClassRef, Identity, StudentRef, UserRole};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// Success envelope around every 2xx response body.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Error body of a non-2xx response.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// Payload of `POST /auth/login` and `POST /auth/register`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: Identity,
    pub token: String,
    pub refresh_token: String,
}

/// Request body for `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Payload of `GET /academic/classes`.
#[derive(Debug, Deserialize)]
pub struct ClassesPayload {
    #[serde(default)]
    pub classes: Vec<ClassRef>,
}

/// Payload of `GET /students`.
#[derive(Debug, Deserialize)]
pub struct StudentsPayload {
    #[serde(default)]
    pub students: Vec<StudentRef>,
}

/// Payload of `GET /attendance`.
#[derive(Debug, Deserialize)]
pub struct AttendancePayload {
    #[serde(default)]
    pub attendance: Vec<AttendanceRow>,
}

/// One stored attendance row; the student arrives populated.
#[derive(Debug, Deserialize)]
pub struct AttendanceRow {
    #[serde(rename = "studentId")]
    pub student: PopulatedRef,
    pub status: AttendanceStatus,
}

/// A populated reference of which only the id is needed.
#[derive(Debug, Deserialize)]
pub struct PopulatedRef {
    #[serde(rename = "_id")]
    pub id: EntityId,
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Request body for `POST /attendance` (batch upsert of one day's sheet).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSubmission {
    pub attendance_records: Vec<SubmitRecord>,
}

/// One record of an attendance submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRecord {
    pub student_id: EntityId,
    pub class_id: EntityId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

impl From<AttendanceRecord> for SubmitRecord {
    fn from(record: AttendanceRecord) -> Self {
        Self {
            student_id: record.student_id,
            class_id: record.class_id,
            date: record.date,
            status: record.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_enveloped_class_list() {
        let body = r#"{"data":{"classes":[
            {"_id":"c1","name":"Grade 5 - A","grade":5,"section":"A"},
            {"_id":"c2","name":"Grade 5 - B","grade":5,"section":"B"}
        ]}}"#;
        let envelope: Envelope<ClassesPayload> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.data.classes.len(), 2);
        assert_eq!(envelope.data.classes[1].id, "c2");
    }

    #[test]
    fn decodes_missing_collection_as_empty() {
        let envelope: Envelope<ClassesPayload> = serde_json::from_str(r#"{"data":{}}"#).unwrap();
        assert!(envelope.data.classes.is_empty());

        let envelope: Envelope<AttendancePayload> =
            serde_json::from_str(r#"{"data":{}}"#).unwrap();
        assert!(envelope.data.attendance.is_empty());
    }

    #[test]
    fn decodes_attendance_row_with_populated_student() {
        let body = r#"{"data":{"attendance":[
            {"_id":"a1","studentId":{"_id":"s1","firstName":"Anil"},"status":"late","remark":null}
        ]}}"#;
        let envelope: Envelope<AttendancePayload> = serde_json::from_str(body).unwrap();
        let row = &envelope.data.attendance[0];
        assert_eq!(row.student.id, "s1");
        assert_eq!(row.status, AttendanceStatus::Late);
    }

    #[test]
    fn decodes_auth_session() {
        let body = r#"{"data":{
            "user":{"id":"u1","email":"a@b.c","role":"teacher","firstName":"Asha","lastName":"Rao","isActive":true},
            "token":"jwt-token",
            "refreshToken":"refresh-token"
        }}"#;
        let envelope: Envelope<AuthSession> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.data.token, "jwt-token");
        assert_eq!(envelope.data.refresh_token, "refresh-token");
        assert_eq!(envelope.data.user.role, UserRole::Teacher);
    }

    #[test]
    fn submission_serializes_with_backend_field_names() {
        let submission = AttendanceSubmission {
            attendance_records: vec![SubmitRecord {
                student_id: "s1".into(),
                class_id: "c1".into(),
                date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
                status: AttendanceStatus::Present,
            }],
        };
        let json = serde_json::to_value(&submission).unwrap();
        let record = &json["attendanceRecords"][0];
        assert_eq!(record["studentId"], "s1");
        assert_eq!(record["classId"], "c1");
        assert_eq!(record["date"], "2026-01-12");
        assert_eq!(record["status"], "present");
    }

    #[test]
    fn error_body_message_is_optional() {
        let body: ErrorBody = serde_json::from_str(r#"{"message":"No such class"}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("No such class"));

        let body: ErrorBody = serde_json::from_str(r#"{}"#).unwrap();
        assert!(body.message.is_none());
    }
}
