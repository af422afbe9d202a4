//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `ids`: Typed identifiers and the id generator
//! - `user`: Registered users
//! - `item`: Lendable items and their categories
//! - `transaction`: Lending transactions
//! - `error`: Error types for the lending pool

pub mod error;
pub mod ids;
pub mod item;
pub mod transaction;
pub mod user;

pub use error::LendingError;
pub use ids::{IdGenerator, ItemId, TransactionId, UserId};
pub use item::{Category, Item};
pub use transaction::Transaction;
pub use user::User;
