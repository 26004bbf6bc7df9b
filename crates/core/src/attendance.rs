//! Attendance status enum and the authority-owned record shape.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// Per-student attendance status for one day.
///
/// A student with no explicit mark is "unmarked" — the absence of an entry,
/// not a fifth variant. Unmarked is a distinct display state during editing
/// and only collapses to `Absent` when a sheet is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl AttendanceStatus {
    /// Every status, in display order.
    pub const ALL: [AttendanceStatus; 4] = [
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Late,
        AttendanceStatus::Excused,
    ];

    /// The backend wire string for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
            AttendanceStatus::Excused => "excused",
        }
    }
}

/// One durable attendance row as owned by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRecord {
    pub student_id: EntityId,
    pub class_id: EntityId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_strings_are_lowercase() {
        for status in AttendanceStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        let status: AttendanceStatus = serde_json::from_str("\"excused\"").unwrap();
        assert_eq!(status, AttendanceStatus::Excused);
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(serde_json::from_str::<AttendanceStatus>("\"unmarked\"").is_err());
    }
}
