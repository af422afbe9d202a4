//! Community Lending Pool Library
//! # Overview
//!
//! This library keeps a register of users, the items they are willing to
//! lend, and the lending transactions between them. State lives in three
//! flat files that are checked for integrity on every start.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (User, Item, Transaction, errors, ids)
//! - [`core`] - Domain lists and the context commands execute against
//! - [`io`] - Record line format, console and text views
//! - [`storage`] - Per-file stores and the manager that keeps them consistent
//! - [`command`] - Parsing an input line into a command and running it
//! - [`session`] - The interactive read-parse-execute loop
//! - [`cli`] - CLI arguments parsing
//!
//! # Data Files
//!
//! Each file starts with a record count, followed by one record per line:
//!
//! ```text
//! 2
//! 1a2b3c4d | Alice | 26
//! 5e6f7a8b | Bob | 24
//! ```
//!
//! The last column of every record is its checksum. A count or checksum that
//! does not match marks the file as corrupted, and the user is asked whether
//! to reset all data.
//!
//! # Commands
//!
//! A command line is `<command>[/<flag> <value>]...`, e.g.
//! `add-tx/i 1a2b3c4d/b 5e6f7a8b/d 3`. Type `list-commands` for the full list.

// Module declarations
pub mod cli;
pub mod command;
pub mod core;
pub mod io;
pub mod session;
pub mod storage;
pub mod types;

pub use command::{create_command, Command};
pub use core::{DomainLists, LendingContext};
pub use io::{ConsoleUi, Ui};
pub use session::Session;
pub use storage::{Startup, StorageManager};
pub use types::{Category, Item, ItemId, LendingError, Transaction, TransactionId, User, UserId};
