//! Session and user identity types

use serde::{Deserialize, Serialize};

/// Identity of the signed-in user, as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Display name
    pub name: String,
    /// Organizational department
    pub department: String,
}

impl std::fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.name, self.department)
    }
}

/// Client-held authentication record for the lifetime of the process
///
/// Starts empty. Only the auth flow marks it authenticated; logout resets it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Whether the backend accepted our credentials
    pub authenticated: bool,
    /// Current user, once fetched
    pub user: Option<UserIdentity>,
}

impl Session {
    /// Whether this session carries no authentication at all
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.authenticated && self.user.is_none()
    }

    /// Reset to the unauthenticated state
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
