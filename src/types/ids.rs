//! Identifiers for users, items and transactions
//!
//! Entities reference each other by id rather than by pointer. Each kind has
//! its own newtype so a user id cannot be passed where an item id is expected.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// Number of hex characters in a generated id
///
/// Ids are typed by hand at the prompt, so they are kept short. The generator
/// remembers every id it has seen, which rules out collisions within a run.
pub const ID_LENGTH: usize = 8;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

string_id!(
    /// Identifier of a registered user
    UserId
);
string_id!(
    /// Identifier of a lendable item
    ItemId
);
string_id!(
    /// Identifier of a lending transaction
    TransactionId
);

/// Produces fresh identifiers
///
/// Every id handed out, and every id registered through [`IdGenerator::reserve`],
/// is remembered so that a new id is disjoint from all of them.
#[derive(Debug, Default)]
pub struct IdGenerator {
    issued: HashSet<String>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an existing id (e.g. one loaded from disk) as taken
    pub fn reserve(&mut self, id: &str) {
        self.issued.insert(id.to_string());
    }

    /// Generate an id that has never been issued or reserved
    pub fn generate(&mut self) -> String {
        loop {
            let candidate: String = Uuid::new_v4()
                .simple()
                .to_string()
                .chars()
                .take(ID_LENGTH)
                .collect();
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    /// Number of ids currently known to the generator
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.issued.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let mut generator = IdGenerator::new();
        let ids: HashSet<String> = (0..2000).map(|_| generator.generate()).collect();
        assert_eq!(ids.len(), 2000);
        assert_eq!(generator.len(), 2000);
    }

    #[test]
    fn test_generated_id_shape() {
        let mut generator = IdGenerator::new();
        let id = generator.generate();
        assert_eq!(id.len(), ID_LENGTH);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_reserved_ids_are_never_generated() {
        let mut generator = IdGenerator::new();
        generator.reserve("deadbeef");
        for _ in 0..500 {
            assert_ne!(generator.generate(), "deadbeef");
        }
    }

    #[test]
    fn test_id_newtypes_display_raw_value() {
        let id = UserId::new("abc123");
        assert_eq!(id.to_string(), "abc123");
        assert_eq!(id.as_str(), "abc123");
        assert_eq!(ItemId::from("x"), ItemId::new("x".to_string()));
    }
}
