//! Storage module
//!
//! Persists the three domain lists to flat files.
//!
//! - `store` - One file, one entity kind
//! - `manager` - Keeps the three files consistent with each other

pub mod manager;
pub mod store;

pub use manager::{confirm_reset, Startup, StorageManager, StoragePaths};
pub use store::Store;
