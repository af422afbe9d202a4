//! Storage manager
//!
//! Orchestrates the three stores so that the users, items and transactions
//! files stay consistent with each other:
//!
//! - The three files are either all present or all absent; anything else is
//!   reported as `FilesIllegallyDeleted` before a single command runs.
//! - A missing file on first run yields an empty list.
//! - A corrupted file, or a file that references entities missing from
//!   another file, leads to an interactive reset prompt instead of silently
//!   dropping data.
//! - Saving writes users, then items, then transactions. Each file is
//!   replaced atomically, but there is no rollback across files: if the
//!   second write fails the first one stays written.

use crate::core::{DomainLists, EntityList};
use crate::io::console::Ui;
use crate::io::line_format::LineRecord;
use crate::storage::store::Store;
use crate::types::{Item, LendingError, Transaction, User};
use std::path::{Path, PathBuf};

pub const USER_FILE: &str = "users.txt";
pub const ITEM_FILE: &str = "items.txt";
pub const TRANSACTION_FILE: &str = "transactions.txt";

const RESET_PROMPT: &str = "Do you want to reset all data? \
    Every user, item and transaction will be deleted. (y/n)";
const RESET_CONFIRMED: &str = "All data has been reset. Starting with empty lists.";
const RESET_DECLINED: &str = "Data files were left untouched. Fix or remove them, then restart.";
const YES_OR_NO: &str = "Please answer 'y' or 'n'.";

/// Locations of the three data files
#[derive(Debug, Clone, PartialEq)]
pub struct StoragePaths {
    pub users: PathBuf,
    pub items: PathBuf,
    pub transactions: PathBuf,
}

impl StoragePaths {
    /// The standard file names inside `directory`
    pub fn in_dir(directory: &Path) -> Self {
        StoragePaths {
            users: directory.join(USER_FILE),
            items: directory.join(ITEM_FILE),
            transactions: directory.join(TRANSACTION_FILE),
        }
    }
}

/// Result of bringing the stores up
#[derive(Debug, PartialEq)]
pub enum Startup {
    /// Lists loaded (or freshly reset); the session may start
    Ready(DomainLists),

    /// The user declined to reset corrupted data; the session must end
    Declined,
}

/// Owner of the three stores
#[derive(Debug, Clone)]
pub struct StorageManager {
    user_store: Store<User>,
    item_store: Store<Item>,
    transaction_store: Store<Transaction>,
}

impl StorageManager {
    pub fn new(paths: StoragePaths) -> Self {
        StorageManager {
            user_store: Store::new(paths.users),
            item_store: Store::new(paths.items),
            transaction_store: Store::new(paths.transactions),
        }
    }

    /// Manager for the standard files inside `directory`
    pub fn in_dir(directory: &Path) -> Self {
        Self::new(StoragePaths::in_dir(directory))
    }

    /// Verify the three files are all present or all absent
    ///
    /// # Errors
    ///
    /// Returns `FilesIllegallyDeleted` naming the present and missing files.
    pub fn check_files_consistent(&self) -> Result<(), LendingError> {
        let probes = [
            (self.user_store.path(), self.user_store.has_file()),
            (self.item_store.path(), self.item_store.has_file()),
            (
                self.transaction_store.path(),
                self.transaction_store.has_file(),
            ),
        ];

        let present: Vec<String> = probes
            .iter()
            .filter(|(_, exists)| *exists)
            .map(|(path, _)| path.display().to_string())
            .collect();

        if present.is_empty() || present.len() == probes.len() {
            return Ok(());
        }

        let missing: Vec<String> = probes
            .iter()
            .filter(|(_, exists)| !*exists)
            .map(|(path, _)| path.display().to_string())
            .collect();

        Err(LendingError::FilesIllegallyDeleted {
            present: present.join(", "),
            missing: missing.join(", "),
        })
    }

    /// Bring the three lists up from disk
    ///
    /// Runs the file consistency check, loads every store, verifies
    /// cross-file references, and on corruption runs the reset prompt on `ui`.
    ///
    /// # Errors
    ///
    /// * `FilesIllegallyDeleted` - One or two of the files are missing
    /// * `StoreFailure` - A confirmed reset could not rewrite the files
    /// * `IoError` - A file could not be opened, or the prompt could not be read
    pub fn initialize(&self, ui: &mut dyn Ui) -> Result<Startup, LendingError> {
        self.check_files_consistent()?;

        match self.load_lists() {
            Ok(lists) => Ok(Startup::Ready(lists)),
            Err(error) if error.is_corruption() => self.handle_data_corruption(&error, ui),
            Err(error) => Err(error),
        }
    }

    /// Load all three lists and verify references between them
    ///
    /// Missing files become empty lists.
    pub fn load_lists(&self) -> Result<DomainLists, LendingError> {
        let lists = DomainLists {
            users: or_empty(self.user_store.load_data())?,
            items: or_empty(self.item_store.load_data())?,
            transactions: or_empty(self.transaction_store.load_data())?,
        };

        lists
            .verify_item_owners()
            .map_err(|reason| corrupted(&self.item_store, reason))?;
        lists
            .verify_transaction_references()
            .map_err(|reason| corrupted(&self.transaction_store, reason))?;
        lists
            .verify_item_availability()
            .map_err(|reason| corrupted(&self.item_store, reason))?;

        Ok(lists)
    }

    /// Report corruption and ask whether to wipe all data
    fn handle_data_corruption(
        &self,
        error: &LendingError,
        ui: &mut dyn Ui,
    ) -> Result<Startup, LendingError> {
        tracing::warn!(%error, "data files failed integrity checks");
        ui.print_error(&error.to_string());
        ui.print_response(RESET_PROMPT);

        if confirm_reset(ui)? {
            Ok(Startup::Ready(self.force_reset()?))
        } else {
            tracing::warn!("reset declined, leaving data files untouched");
            Ok(Startup::Declined)
        }
    }

    /// Replace all data with empty lists, on disk and in memory
    ///
    /// # Returns
    ///
    /// The fresh lists the session must continue with.
    pub fn force_reset(&self) -> Result<DomainLists, LendingError> {
        let lists = DomainLists::new();
        self.write_data_to_file(&lists)?;
        tracing::info!("data files reset");
        Ok(lists)
    }

    /// Write users, items and transactions, in that order
    ///
    /// Stops at the first failure; files written before it keep their new
    /// contents.
    pub fn write_data_to_file(&self, lists: &DomainLists) -> Result<(), LendingError> {
        self.user_store
            .write_data(&lists.users)
            .and_then(|()| self.item_store.write_data(&lists.items))
            .and_then(|()| self.transaction_store.write_data(&lists.transactions))
            .inspect_err(|error| tracing::error!(%error, "saving data files failed"))?;

        tracing::info!(
            users = lists.users.len(),
            items = lists.items.len(),
            transactions = lists.transactions.len(),
            "data files saved"
        );
        Ok(())
    }
}

/// Ask for `y` or `n` until one is given
///
/// Exhausted input counts as `n`.
pub fn confirm_reset(ui: &mut dyn Ui) -> Result<bool, LendingError> {
    loop {
        let Some(answer) = ui.read_input()? else {
            return Ok(false);
        };
        match answer.trim().to_lowercase().as_str() {
            "y" => {
                ui.print_response(RESET_CONFIRMED);
                return Ok(true);
            }
            "n" => {
                ui.print_response(RESET_DECLINED);
                return Ok(false);
            }
            _ => ui.print_response(YES_OR_NO),
        }
    }
}

fn or_empty<E: LineRecord>(
    loaded: Result<EntityList<E>, LendingError>,
) -> Result<EntityList<E>, LendingError> {
    match loaded {
        Err(LendingError::FileNotFound { path }) => {
            tracing::info!(%path, "no {} file yet, starting empty", E::KIND);
            Ok(EntityList::new())
        }
        other => other,
    }
}

fn corrupted<E: LineRecord>(store: &Store<E>, reason: String) -> LendingError {
    LendingError::corrupted_store(&store.path().display().to_string(), reason)
}
