//! Daily attendance: the working set, derived stats, and the reconciliation
//! engine that keeps local edits consistent with the backend's stored truth.
//!
//! [`AttendanceEngine`] is the state machine behind the attendance page:
//! it loads the roster and stored records for one (class, date) pair, tracks
//! per-student marks, and submits a normalized batch in which every roster
//! student gets exactly one status; unmarked students deliberately default
//! to absent.

pub mod authority;
pub mod engine;
pub mod sheet;

pub use authority::AttendanceApi;
pub use engine::{AttendanceEngine, AttendanceError, EngineState};
pub use sheet::{AttendanceSheet, AttendanceStats};
