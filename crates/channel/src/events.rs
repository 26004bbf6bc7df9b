//! Live channel frame types and parser.
//!
//! The notification service sends JSON frames shaped
//! `{"event": "<name>", "data": {...}}`. This module deserializes them into
//! the strongly-typed [`LiveEvent`] union.

use serde::Deserialize;

use campus_core::events::{EVENT_ATTENDANCE_REPORT_SENT, EVENT_FEE_CHECK, EVENT_LIBRARY_CHECK};

/// All known server-pushed live events.
///
/// Deserialized via the internally-tagged `"event"` field with associated
/// `"data"` content.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum LiveEvent {
    /// A scheduled attendance report was dispatched.
    #[serde(rename = "attendance_report_sent")]
    AttendanceReportSent(EventMessage),

    /// Library alert (overdue book, fine) for the current user.
    #[serde(rename = "library_check")]
    LibraryCheck(EventMessage),

    /// Fee alert (due/overdue payment) for the current user.
    #[serde(rename = "fee_check")]
    FeeCheck(EventMessage),
}

/// Payload common to all notification events.
#[derive(Debug, Clone, Deserialize)]
pub struct EventMessage {
    pub message: String,
}

impl LiveEvent {
    /// The wire event name, used as the subscription key.
    pub fn name(&self) -> &'static str {
        match self {
            LiveEvent::AttendanceReportSent(_) => EVENT_ATTENDANCE_REPORT_SENT,
            LiveEvent::LibraryCheck(_) => EVENT_LIBRARY_CHECK,
            LiveEvent::FeeCheck(_) => EVENT_FEE_CHECK,
        }
    }

    /// The human-readable message carried by the event.
    pub fn message(&self) -> &str {
        match self {
            LiveEvent::AttendanceReportSent(data)
            | LiveEvent::LibraryCheck(data)
            | LiveEvent::FeeCheck(data) => &data.message,
        }
    }
}

/// Parse a live channel text frame into a typed event.
///
/// Returns `Err` for malformed JSON or unknown `event` values. Callers
/// should log unknown frames and continue.
pub fn parse_frame(text: &str) -> Result<LiveEvent, serde_json::Error> {
    serde_json::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_report_sent_frame() {
        let json =
            r#"{"event":"attendance_report_sent","data":{"message":"Report for Grade 5 sent"}}"#;
        let event = parse_frame(json).unwrap();
        match &event {
            LiveEvent::AttendanceReportSent(data) => {
                assert_eq!(data.message, "Report for Grade 5 sent");
            }
            other => panic!("Expected AttendanceReportSent, got {other:?}"),
        }
        assert_eq!(event.name(), "attendance_report_sent");
    }

    #[test]
    fn parse_library_check_frame() {
        let json = r#"{"event":"library_check","data":{"message":"2 books overdue"}}"#;
        let event = parse_frame(json).unwrap();
        match &event {
            LiveEvent::LibraryCheck(data) => assert_eq!(data.message, "2 books overdue"),
            other => panic!("Expected LibraryCheck, got {other:?}"),
        }
    }

    #[test]
    fn parse_fee_check_frame() {
        let json = r#"{"event":"fee_check","data":{"message":"Fee due"}}"#;
        let event = parse_frame(json).unwrap();
        match &event {
            LiveEvent::FeeCheck(data) => assert_eq!(data.message, "Fee due"),
            other => panic!("Expected FeeCheck, got {other:?}"),
        }
        assert_eq!(event.message(), "Fee due");
    }

    #[test]
    fn parse_unknown_event_returns_error() {
        assert!(parse_frame(r#"{"event":"grade_check","data":{"message":"x"}}"#).is_err());
    }

    #[test]
    fn parse_invalid_json_returns_error() {
        assert!(parse_frame("not json at all").is_err());
    }

    #[test]
    fn parse_frame_without_message_returns_error() {
        assert!(parse_frame(r#"{"event":"fee_check","data":{}}"#).is_err());
    }
}
