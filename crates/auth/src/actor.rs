use leafy_core::Username;

use crate::Role;

/// The identity a request acts under.
///
/// Several storefront operations (catalog browsing, order placement, guest
/// order lookup) are open to unauthenticated callers, so "no credential" is a
/// first-class actor rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    /// No (valid) credential presented.
    Guest,
    /// Authenticated account.
    User { username: Username, role: Role },
}

impl Actor {
    pub fn user(username: Username, role: Role) -> Self {
        Self::User { username, role }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Actor::Guest)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Actor::User { role: Role::Admin, .. })
    }

    /// Username for authenticated actors, `None` for guests.
    pub fn username(&self) -> Option<&Username> {
        match self {
            Actor::Guest => None,
            Actor::User { username, .. } => Some(username),
        }
    }
}
