//! Application context
//!
//! `LendingContext` bundles everything a command may touch: the three domain
//! lists, the id generator and the clock. It is built once at startup and
//! passed by `&mut` into every command.

use crate::core::entity_list::{ItemList, TransactionList, UserList};
use crate::types::IdGenerator;
use chrono::{Local, NaiveDate};

/// The three domain lists
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainLists {
    pub users: UserList,
    pub items: ItemList,
    pub transactions: TransactionList,
}

impl DomainLists {
    /// Create three empty lists
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that every item's owner exists
    ///
    /// # Returns
    ///
    /// * `Ok(())` - All owners resolve
    /// * `Err(String)` - Description of the first dangling reference
    pub fn verify_item_owners(&self) -> Result<(), String> {
        for item in &self.items {
            if !self.users.contains(item.owner_id().as_str()) {
                return Err(format!(
                    "item {} is owned by unknown user {}",
                    item.id(),
                    item.owner_id()
                ));
            }
        }
        Ok(())
    }

    /// Check that every transaction's item, lender and borrower exist, and
    /// that items held by unfinished transactions are marked unavailable
    pub fn verify_transaction_references(&self) -> Result<(), String> {
        for tx in &self.transactions {
            let item = self
                .items
                .get(tx.item_id().as_str())
                .map_err(|_| format!("transaction {} references unknown item {}", tx.id(), tx.item_id()))?;

            for user in [tx.lender_id(), tx.borrower_id()] {
                if !self.users.contains(user.as_str()) {
                    return Err(format!(
                        "transaction {} references unknown user {}",
                        tx.id(),
                        user
                    ));
                }
            }

            if !tx.is_finished() && item.is_available() {
                return Err(format!(
                    "item {} is lent by transaction {} but marked available",
                    item.id(),
                    tx.id()
                ));
            }
        }
        Ok(())
    }

    /// Check that every item marked unavailable is held by an unfinished
    /// transaction
    pub fn verify_item_availability(&self) -> Result<(), String> {
        for item in &self.items {
            if !item.is_available() && !self.transactions.has_open_loan(item.id()) {
                return Err(format!(
                    "item {} is marked lent but no transaction holds it",
                    item.id()
                ));
            }
        }
        Ok(())
    }
}

/// Everything a command executes against
#[derive(Debug)]
pub struct LendingContext {
    pub lists: DomainLists,
    ids: IdGenerator,

    /// Fixed date for tests; `None` means the local calendar date
    today: Option<NaiveDate>,
}

impl LendingContext {
    /// Create a context over `lists`
    ///
    /// Every id already present in the lists is reserved so that freshly
    /// generated ids never collide with loaded ones.
    pub fn new(lists: DomainLists) -> Self {
        let mut ids = IdGenerator::new();
        for user in &lists.users {
            ids.reserve(user.id().as_str());
        }
        for item in &lists.items {
            ids.reserve(item.id().as_str());
        }
        for tx in &lists.transactions {
            ids.reserve(tx.id().as_str());
        }

        LendingContext {
            lists,
            ids,
            today: None,
        }
    }

    /// Pin the context's notion of "today"
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// A fresh id, distinct from every id in the lists or issued before
    pub fn next_id(&mut self) -> String {
        self.ids.generate()
    }

    /// Consume the context, returning the lists for saving
    pub fn into_lists(self) -> DomainLists {
        self.lists
    }
}
