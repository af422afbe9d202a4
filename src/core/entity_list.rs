//! Domain lists
//!
//! This module provides `EntityList`, an ordered collection of one entity kind
//! with an id → position table for lookups. Insertion order is preserved, which
//! is also the order the stores write records in.
//!
//! Kind-specific queries (items of an owner, transactions of a user) live in
//! dedicated `impl` blocks on the `ItemList` and `TransactionList` aliases.

use crate::core::traits::Entity;
use crate::types::{Item, ItemId, LendingError, Transaction, User, UserId};
use rust_decimal::Decimal;
use std::borrow::Borrow;
use std::collections::HashMap;

/// Ordered collection of entities with id-based lookup
#[derive(Debug, Clone)]
pub struct EntityList<E: Entity> {
    /// Entities in insertion order
    entries: Vec<E>,

    /// Map of id to position in `entries`
    index: HashMap<E::Id, usize>,
}

pub type UserList = EntityList<User>;
pub type ItemList = EntityList<Item>;
pub type TransactionList = EntityList<Transaction>;

impl<E: Entity> EntityList<E> {
    /// Create a new empty list
    pub fn new() -> Self {
        EntityList {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Append an entity
    ///
    /// # Returns
    ///
    /// * `true` - The entity was added
    /// * `false` - An entity with the same id already exists; the list is unchanged
    pub fn push(&mut self, entity: E) -> bool {
        if self.index.contains_key(Borrow::<str>::borrow(entity.id())) {
            return false;
        }
        self.index.insert(entity.id().clone(), self.entries.len());
        self.entries.push(entity);
        true
    }

    /// Look up an entity by id
    ///
    /// # Errors
    ///
    /// Returns the kind-specific not-found error if the id is unknown.
    pub fn get(&self, id: &str) -> Result<&E, LendingError> {
        self.index
            .get(id)
            .map(|&position| &self.entries[position])
            .ok_or_else(|| E::not_found(id))
    }

    /// Mutable lookup by id
    pub fn get_mut(&mut self, id: &str) -> Result<&mut E, LendingError> {
        match self.index.get(id) {
            Some(&position) => Ok(&mut self.entries[position]),
            None => Err(E::not_found(id)),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Remove an entity by id, keeping the order of the remaining entities
    pub fn remove(&mut self, id: &str) -> Result<E, LendingError> {
        let position = self.index.remove(id).ok_or_else(|| E::not_found(id))?;
        let removed = self.entries.remove(position);

        // Entities after the removed one shifted down by one
        for entity in &self.entries[position..] {
            if let Some(slot) = self.index.get_mut(Borrow::<str>::borrow(entity.id())) {
                *slot -= 1;
            }
        }

        Ok(removed)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.entries.iter()
    }

    /// Entities matching `predicate`, in list order
    pub fn filter<P>(&self, predicate: P) -> Vec<&E>
    where
        P: Fn(&E) -> bool,
    {
        self.entries.iter().filter(|entity| predicate(entity)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E: Entity> Default for EntityList<E> {
    fn default() -> Self {
        Self::new()
    }
}

// Two lists are equal when they hold equal entities in the same order
impl<E: Entity + PartialEq> PartialEq for EntityList<E> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<'a, E: Entity> IntoIterator for &'a EntityList<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl ItemList {
    /// Items owned by `owner`
    pub fn owned_by(&self, owner: &UserId) -> Vec<&Item> {
        self.filter(|item| item.owner_id() == owner)
    }

    /// Items whose name contains `keyword`, ignoring case
    pub fn search(&self, keyword: &str) -> Vec<&Item> {
        let keyword = keyword.to_lowercase();
        self.filter(|item| item.name().to_lowercase().contains(&keyword))
    }
}

impl TransactionList {
    /// Transactions where `user` is lender or borrower
    pub fn involving(&self, user: &UserId) -> Vec<&Transaction> {
        self.filter(|tx| tx.involves(user))
    }

    pub fn borrowed_by(&self, user: &UserId) -> Vec<&Transaction> {
        self.filter(|tx| tx.borrower_id() == user)
    }

    pub fn lent_by(&self, user: &UserId) -> Vec<&Transaction> {
        self.filter(|tx| tx.lender_id() == user)
    }

    /// First transaction that references `item`, if any
    pub fn referencing_item(&self, item: &ItemId) -> Option<&Transaction> {
        self.iter().find(|tx| tx.item_id() == item)
    }

    /// Whether an unfinished transaction currently holds `item`
    pub fn has_open_loan(&self, item: &ItemId) -> bool {
        self.iter()
            .any(|tx| tx.item_id() == item && !tx.is_finished())
    }

    /// Sum of money transacted over `transactions`
    pub fn total_money<'a, I>(transactions: I) -> Decimal
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        transactions
            .into_iter()
            .map(Transaction::money_transacted)
            .sum()
    }
}
