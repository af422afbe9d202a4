//! Core domain module
//!
//! This module contains the in-memory side of the lending pool:
//! - `traits` - The `Entity` abstraction shared by users, items and transactions
//! - `entity_list` - Ordered domain lists with id lookup and filtering
//! - `context` - The application context commands execute against

pub mod context;
pub mod entity_list;
pub mod traits;

pub use context::{DomainLists, LendingContext};
pub use entity_list::{EntityList, ItemList, TransactionList, UserList};
pub use traits::Entity;
