use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use leafy_core::Username;

/// Literal marker stored for orders placed without authentication.
pub const GUEST_MARKER: &str = "guest";

/// Who an order belongs to.
///
/// Serializes to a plain string (`"guest"` or the username) so the wire and
/// storage representation matches the original `userId` column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderOwner {
    Guest,
    Registered(Username),
}

impl OrderOwner {
    pub fn as_str(&self) -> &str {
        match self {
            OrderOwner::Guest => GUEST_MARKER,
            OrderOwner::Registered(username) => username.as_str(),
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, OrderOwner::Guest)
    }
}

impl core::fmt::Display for OrderOwner {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderOwner {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == GUEST_MARKER {
            return Ok(OrderOwner::Guest);
        }
        match Username::new(s) {
            Ok(username) => Ok(OrderOwner::Registered(username)),
            // Blank owner fields in stored data collapse to the guest marker.
            Err(_) => Ok(OrderOwner::Guest),
        }
    }
}

impl Serialize for OrderOwner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderOwner {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or(OrderOwner::Guest))
    }
}
