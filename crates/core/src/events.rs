//! Well-known live event names pushed by the backend.
//!
//! These must match the names the notification service emits over the
//! event stream.

/// A scheduled attendance report was dispatched.
pub const EVENT_ATTENDANCE_REPORT_SENT: &str = "attendance_report_sent";

/// A library alert (overdue book, fine) for the current user.
pub const EVENT_LIBRARY_CHECK: &str = "library_check";

/// A fee alert (due/overdue payment) for the current user.
pub const EVENT_FEE_CHECK: &str = "fee_check";

/// Every event name the notification surface listens for.
pub const LIVE_EVENTS: &[&str] = &[
    EVENT_ATTENDANCE_REPORT_SENT,
    EVENT_LIBRARY_CHECK,
    EVENT_FEE_CHECK,
];
