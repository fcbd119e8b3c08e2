//! Role checks at the operation boundary.
//!
//! - No IO
//! - No panics
//! - No business logic (pure policy checks)
//!
//! Which orders an actor may *see* is order-shaped policy and lives next to
//! the order model in `leafy-orders`.

use leafy_core::DomainError;

use crate::Actor;

/// Require an authenticated admin.
///
/// Guests are `Unauthenticated` (they presented no credential at all);
/// authenticated non-admins are `PermissionDenied`.
pub fn ensure_admin(actor: &Actor) -> Result<(), DomainError> {
    match actor {
        Actor::Guest => Err(DomainError::Unauthenticated),
        Actor::User { role, .. } if role.is_admin() => Ok(()),
        Actor::User { .. } => Err(DomainError::PermissionDenied),
    }
}

/// Require any authenticated account.
pub fn ensure_authenticated(actor: &Actor) -> Result<(), DomainError> {
    match actor {
        Actor::Guest => Err(DomainError::Unauthenticated),
        Actor::User { .. } => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;
    use leafy_core::Username;

    fn user(name: &str, role: Role) -> Actor {
        Actor::user(Username::new(name).unwrap(), role)
    }

    #[test]
    fn admin_passes_both_checks() {
        let admin = user("sulvianti", Role::Admin);
        assert!(ensure_admin(&admin).is_ok());
        assert!(ensure_authenticated(&admin).is_ok());
    }

    #[test]
    fn customer_is_denied_admin_access() {
        let customer = user("budi", Role::Customer);
        assert_eq!(ensure_admin(&customer), Err(DomainError::PermissionDenied));
        assert!(ensure_authenticated(&customer).is_ok());
    }

    #[test]
    fn guest_is_unauthenticated() {
        assert_eq!(ensure_admin(&Actor::Guest), Err(DomainError::Unauthenticated));
        assert_eq!(
            ensure_authenticated(&Actor::Guest),
            Err(DomainError::Unauthenticated)
        );
    }
}
