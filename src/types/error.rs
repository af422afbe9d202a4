//! Error types for the lending pool
//!
//! This module defines every error that can occur while parsing commands,
//! executing them against the domain lists, and loading or saving the stores.
//! Errors are designed to be descriptive and user-friendly for console output.
//!
//! # Error Categories
//!
//! - **Command Errors**: Unknown command, wrong argument count, malformed flags
//! - **Lookup Errors**: User, item or transaction id not found
//! - **Integrity Errors**: Removing referenced entities, lending unavailable items
//! - **Storage Errors**: Missing files, corrupted records, failed writes

use thiserror::Error;

/// Main error type for the lending pool
///
/// Every operation in the crate returns `Result<_, LendingError>`. Callers
/// match on the variant instead of relying on unwinding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LendingError {
    /// The leading token of an input line is not a known command
    #[error("Unknown command '{command}'. Type 'list-commands' to see what is available")]
    CommandNotFound {
        /// The token that was entered
        command: String,
    },

    /// A command received the wrong number of `/flag value` groups
    #[error("Wrong number of arguments for '{command}': expected {expected}, got {actual}")]
    InsufficientArguments {
        /// The command name
        command: String,
        /// Human readable description of the accepted counts
        expected: String,
        /// Number of groups received
        actual: usize,
    },

    /// A flag is missing, duplicated, unknown, or carries an unusable value
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of what was wrong
        message: String,
    },

    #[error("User {id} not found")]
    UserNotFound { id: String },

    #[error("Item {id} not found")]
    ItemNotFound { id: String },

    #[error("Transaction {id} not found")]
    TransactionNotFound { id: String },

    /// A user cannot be removed while items or transactions reference it
    #[error("User {id} cannot be removed: {reason}")]
    UserInUse { id: String, reason: String },

    /// An item cannot be removed while transactions reference it
    #[error("Item {id} cannot be removed: it is referenced by transaction {transaction}")]
    ItemInUse { id: String, transaction: String },

    /// The item is currently lent out or on hold
    #[error("Item {id} is not available for lending")]
    ItemUnavailable { id: String },

    /// A stored record has the wrong number of columns or a column failed to parse
    #[error("Malformed record: {message}")]
    MalformedRecord { message: String },

    /// A stored record's checksum does not match its content
    #[error("Checksum mismatch: stored {stored}, computed {computed}")]
    ChecksumMismatch { stored: usize, computed: usize },

    /// The backing file of a store does not exist
    ///
    /// Recovered at startup by substituting an empty list.
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// A store file failed its integrity checks
    ///
    /// Escalated to the interactive reset flow, never recovered silently.
    #[error("Data file {path} has been illegally modified ({reason})")]
    CorruptedStore { path: String, reason: String },

    /// Only one or two of the three data files exist
    #[error("Data files were illegally deleted: {present} present, {missing} missing. Restore or delete the remaining data files to continue")]
    FilesIllegallyDeleted { present: String, missing: String },

    /// Directory creation or file write failed
    #[error("Failed to store data in {path}: {message}")]
    StoreFailure { path: String, message: String },

    /// I/O error on the console or a data file
    #[error("I/O error: {message}")]
    IoError { message: String },
}

// Conversion from io::Error to LendingError
impl From<std::io::Error> for LendingError {
    fn from(error: std::io::Error) -> Self {
        LendingError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to LendingError
impl From<csv::Error> for LendingError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LendingError::MalformedRecord {
            message: match line {
                Some(line) => format!("line {}: {}", line, error),
                None => error.to_string(),
            },
        }
    }
}

// Helper functions for creating common errors

impl LendingError {
    /// Create a CommandNotFound error
    pub fn command_not_found(command: &str) -> Self {
        LendingError::CommandNotFound {
            command: command.to_string(),
        }
    }

    /// Create an InsufficientArguments error
    pub fn insufficient_arguments(command: &str, expected: &str, actual: usize) -> Self {
        LendingError::InsufficientArguments {
            command: command.to_string(),
            expected: expected.to_string(),
            actual,
        }
    }

    /// Create an InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        LendingError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn user_not_found(id: &str) -> Self {
        LendingError::UserNotFound { id: id.to_string() }
    }

    pub fn item_not_found(id: &str) -> Self {
        LendingError::ItemNotFound { id: id.to_string() }
    }

    pub fn transaction_not_found(id: &str) -> Self {
        LendingError::TransactionNotFound { id: id.to_string() }
    }

    /// Create a MalformedRecord error
    pub fn malformed_record(message: impl Into<String>) -> Self {
        LendingError::MalformedRecord {
            message: message.into(),
        }
    }

    /// Create a CorruptedStore error for the file at `path`
    pub fn corrupted_store(path: &str, reason: impl Into<String>) -> Self {
        LendingError::CorruptedStore {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a StoreFailure error for the file at `path`
    pub fn store_failure(path: &str, message: impl Into<String>) -> Self {
        LendingError::StoreFailure {
            path: path.to_string(),
            message: message.into(),
        }
    }

    /// Whether this error is a storage integrity failure that warrants a reset
    pub fn is_corruption(&self) -> bool {
        matches!(self, LendingError::CorruptedStore { .. })
    }
}
