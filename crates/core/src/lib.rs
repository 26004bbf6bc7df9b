//! Campus domain types shared across the workspace.
//!
//! This crate is the dependency-light foundation: entity types mirroring the
//! school backend's wire shapes, well-known constants (roles, live event
//! names), the role-gated section access map, and display helpers. It has no
//! networking or async code of its own.

pub mod academic;
pub mod access;
pub mod attendance;
pub mod error;
pub mod events;
pub mod format;
pub mod identity;
pub mod types;

pub use academic::{ClassRef, StudentRef};
pub use access::DashboardSection;
pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use error::CoreError;
pub use identity::{Identity, UserRole};
pub use types::{EntityId, Timestamp};
