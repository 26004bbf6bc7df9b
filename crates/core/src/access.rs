//! Role-gated access to dashboard sections.
//!
//! Mirrors the sidebar menu and route guards: each section lists the roles
//! allowed to open it, and everything else is hidden.

use crate::identity::UserRole;

/// A top-level dashboard section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardSection {
    Dashboard,
    Students,
    Teachers,
    Attendance,
    Grades,
    Fees,
    Library,
    Transport,
    Settings,
}

/// All roles, for sections open to everyone.
const ALL_ROLES: &[UserRole] = &[
    UserRole::Superadmin,
    UserRole::Principal,
    UserRole::Teacher,
    UserRole::Parent,
    UserRole::Student,
];

impl DashboardSection {
    /// Every section, in sidebar order.
    pub const ALL: [DashboardSection; 9] = [
        DashboardSection::Dashboard,
        DashboardSection::Students,
        DashboardSection::Teachers,
        DashboardSection::Attendance,
        DashboardSection::Grades,
        DashboardSection::Fees,
        DashboardSection::Library,
        DashboardSection::Transport,
        DashboardSection::Settings,
    ];

    /// Roles allowed to open this section.
    pub fn allowed_roles(self) -> &'static [UserRole] {
        match self {
            DashboardSection::Dashboard => ALL_ROLES,
            DashboardSection::Students => &[
                UserRole::Superadmin,
                UserRole::Principal,
                UserRole::Teacher,
            ],
            DashboardSection::Teachers => &[UserRole::Superadmin, UserRole::Principal],
            DashboardSection::Attendance => &[
                UserRole::Superadmin,
                UserRole::Principal,
                UserRole::Teacher,
            ],
            DashboardSection::Grades => ALL_ROLES,
            DashboardSection::Fees => &[
                UserRole::Superadmin,
                UserRole::Principal,
                UserRole::Parent,
            ],
            DashboardSection::Library => &[
                UserRole::Superadmin,
                UserRole::Principal,
                UserRole::Teacher,
                UserRole::Student,
            ],
            DashboardSection::Transport => &[UserRole::Superadmin, UserRole::Principal],
            DashboardSection::Settings => ALL_ROLES,
        }
    }

    /// Whether `role` may open this section.
    pub fn can_access(self, role: UserRole) -> bool {
        self.allowed_roles().contains(&role)
    }
}

/// The sections visible to `role`, in sidebar order.
pub fn accessible_sections(role: UserRole) -> Vec<DashboardSection> {
    DashboardSection::ALL
        .into_iter()
        .filter(|section| section.can_access(role))
        .collect()
}
