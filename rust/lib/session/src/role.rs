use crate::model::UserSnapshot;

/// Role markers as issued by the identity provider. Matching is exact,
/// including case.
pub mod role_marker {
    pub const SUPERADMIN: &str = "SUPERADMIN";
    pub const ADMIN: &str = "ADMIN";
}

/// Where the actor sits in the gate's state machine.
///
/// Moving between phases only happens through a session write in storage
/// (login, logout, clear, or a re-login with different roles).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessPhase {
    Unauthenticated,
    AuthenticatedAdmin,
    AuthenticatedNonAdmin,
}

impl AccessPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessPhase::Unauthenticated => "unauthenticated",
            AccessPhase::AuthenticatedAdmin => "admin",
            AccessPhase::AuthenticatedNonAdmin => "non-admin",
        }
    }
}

/// Authorization facts derived from one read of the user snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Authorization {
    pub authenticated: bool,
    pub admin: bool,
    pub super_admin: bool,
}

impl Authorization {
    pub fn unauthenticated() -> Self {
        Self::default()
    }

    /// Classify a snapshot. A present snapshot is authenticated even with no
    /// roles at all; SUPERADMIN implies admin.
    pub fn from_user(user: Option<&UserSnapshot>) -> Self {
        match user {
            None => Self::unauthenticated(),
            Some(user) => Self::authenticated(
                user.has_role(role_marker::SUPERADMIN),
                user.has_role(role_marker::ADMIN),
            ),
        }
    }

    /// Classify the roles of a present snapshot.
    pub fn from_roles(roles: &[String]) -> Self {
        let has = |marker: &str| roles.iter().any(|r| r == marker);
        Self::authenticated(has(role_marker::SUPERADMIN), has(role_marker::ADMIN))
    }

    fn authenticated(super_admin: bool, admin: bool) -> Self {
        Self {
            authenticated: true,
            admin: super_admin || admin,
            super_admin,
        }
    }

    pub fn phase(&self) -> AccessPhase {
        match (self.authenticated, self.admin) {
            (false, _) => AccessPhase::Unauthenticated,
            (true, true) => AccessPhase::AuthenticatedAdmin,
            (true, false) => AccessPhase::AuthenticatedNonAdmin,
        }
    }
}
