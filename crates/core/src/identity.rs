//! Authenticated user identity and role.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// Role assigned to every dashboard user.
///
/// Wire values match the backend's role strings exactly
/// (note `superadmin` is a single word).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Superadmin,
    Principal,
    Teacher,
    Parent,
    Student,
}

impl UserRole {
    /// The backend wire string for this role.
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Superadmin => "superadmin",
            UserRole::Principal => "principal",
            UserRole::Teacher => "teacher",
            UserRole::Parent => "parent",
            UserRole::Student => "student",
        }
    }
}

/// The authenticated user as returned by the auth endpoints and persisted
/// across reloads.
///
/// A restored identity is trusted provisionally; the first authenticated
/// request that fails is the point of truth for staleness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: EntityId,
    pub email: String,
    pub role: UserRole,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Identity {
    /// "First Last", as shown in the dashboard header greeting.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
