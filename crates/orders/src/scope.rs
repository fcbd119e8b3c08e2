//! Who may see which orders.
//!
//! Pure policy over the actor and the caller-supplied lookup keys; the
//! resulting filter is what the persistence gateway executes. Guests get no
//! enumeration path: without an exact phone or order id they see nothing.

use leafy_core::{OrderId, Username};
use leafy_auth::Actor;

/// Gateway-level order query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderFilter {
    All,
    ByUser(Username),
    ByPhone(String),
    ById(OrderId),
}

/// Lookup keys a caller may supply alongside the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderLookup {
    pub phone: Option<String>,
    pub order_id: Option<OrderId>,
}

/// Resolve the filter an actor's order listing runs under.
///
/// - Admins see everything; their lookup keys are ignored.
/// - Authenticated customers see exactly their own orders.
/// - Guests may look up by exact phone, or failing that by exact order id.
/// - A guest with neither key gets `None`: the caller returns an empty list.
pub fn scope_orders(actor: &Actor, lookup: &OrderLookup) -> Option<OrderFilter> {
    if let Actor::User { username, role } = actor {
        if role.is_admin() {
            return Some(OrderFilter::All);
        }
        return Some(OrderFilter::ByUser(username.clone()));
    }

    if let Some(phone) = lookup.phone.as_deref() {
        if !phone.trim().is_empty() {
            return Some(OrderFilter::ByPhone(phone.trim().to_string()));
        }
    }
    lookup.order_id.map(OrderFilter::ById)
}
