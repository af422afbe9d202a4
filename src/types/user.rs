//! User type for the lending pool

use super::ids::UserId;
use std::fmt;

/// A registered member of the lending pool
///
/// Users own items through the item's `owner_id`; the user itself keeps no
/// list of what it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    name: String,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        User {
            id,
            name: name.into().trim().to_string(),
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Username: {} (ID: {})", self.name, self.id)
    }
}
