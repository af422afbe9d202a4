//! Core traits shared by the domain lists
//!
//! This module defines the trait abstraction that lets one generic list type,
//! and one generic store, serve users, items and transactions alike.

use crate::types::{Item, ItemId, LendingError, Transaction, TransactionId, User, UserId};
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

/// An entity that lives in a domain list and is looked up by id
///
/// `Display` is the entity's default text rendering; the line codec derives
/// the per-record checksum from it.
pub trait Entity: Clone + fmt::Debug + fmt::Display {
    /// The typed identifier of this entity kind
    type Id: Clone + fmt::Debug + fmt::Display + Eq + Hash + Borrow<str>;

    /// Singular name used in messages and logs, e.g. "user"
    const KIND: &'static str;

    fn id(&self) -> &Self::Id;

    /// The kind-specific "not found" error for `id`
    fn not_found(id: &str) -> LendingError;
}

impl Entity for User {
    type Id = UserId;
    const KIND: &'static str = "user";

    fn id(&self) -> &UserId {
        User::id(self)
    }

    fn not_found(id: &str) -> LendingError {
        LendingError::user_not_found(id)
    }
}

impl Entity for Item {
    type Id = ItemId;
    const KIND: &'static str = "item";

    fn id(&self) -> &ItemId {
        Item::id(self)
    }

    fn not_found(id: &str) -> LendingError {
        LendingError::item_not_found(id)
    }
}

impl Entity for Transaction {
    type Id = TransactionId;
    const KIND: &'static str = "transaction";

    fn id(&self) -> &TransactionId {
        Transaction::id(self)
    }

    fn not_found(id: &str) -> LendingError {
        LendingError::transaction_not_found(id)
    }
}
