//! File store for one entity kind
//!
//! A `Store<E>` owns the path of one data file and moves a whole
//! `EntityList<E>` in or out of it. Format concerns are delegated to the
//! `line_format` module.
//!
//! # Loading
//!
//! The first line holds the record count; every following line is one
//! record. Any corruption anywhere in the file fails the whole load. There is
//! no best-effort recovery.
//!
//! # Writing
//!
//! The list is encoded in memory, written to a temporary file beside the
//! target and renamed over it, so a reader never observes a half-written
//! file. A missing parent directory is created once and the write retried
//! once.

use crate::core::EntityList;
use crate::io::line_format::{decode_record, encode_list, record_reader, LineRecord};
use crate::types::LendingError;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Load/save adapter between an `EntityList<E>` and one file
#[derive(Debug, Clone)]
pub struct Store<E> {
    path: PathBuf,
    _kind: PhantomData<E>,
}

impl<E: LineRecord> Store<E> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Store {
            path: path.into(),
            _kind: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Existence probe for the tri-file consistency check
    pub fn has_file(&self) -> bool {
        self.path.exists()
    }

    /// Read the whole file into a list
    ///
    /// # Errors
    ///
    /// * `FileNotFound` - The file does not exist
    /// * `CorruptedStore` - The count line is missing or wrong, or any record
    ///   fails to decode or verify
    /// * `IoError` - The file exists but could not be opened
    pub fn load_data(&self) -> Result<EntityList<E>, LendingError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LendingError::FileNotFound {
                    path: self.display_path(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        let list = decode_file::<E, _>(file)
            .map_err(|e| LendingError::corrupted_store(&self.display_path(), e.to_string()))?;

        tracing::info!(path = %self.path.display(), records = list.len(), "loaded {} store", E::KIND);
        Ok(list)
    }

    /// Replace the file with the contents of `list`
    ///
    /// # Errors
    ///
    /// Returns `StoreFailure` if the parent directory cannot be created or
    /// the second write attempt fails.
    pub fn write_data(&self, list: &EntityList<E>) -> Result<(), LendingError> {
        let contents = encode_list(list);

        match self.replace_file(&contents) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let directory = self.directory();
                tracing::debug!(directory = %directory.display(), "creating data directory");
                fs::create_dir_all(directory)
                    .map_err(|e| LendingError::store_failure(&self.display_path(), e.to_string()))?;
                self.replace_file(&contents)
                    .map_err(|e| LendingError::store_failure(&self.display_path(), e.to_string()))?;
            }
            Err(e) => {
                return Err(LendingError::store_failure(
                    &self.display_path(),
                    e.to_string(),
                ))
            }
        }

        tracing::debug!(path = %self.path.display(), records = list.len(), "wrote {} store", E::KIND);
        Ok(())
    }

    fn replace_file(&self, contents: &str) -> io::Result<()> {
        let mut temp = NamedTempFile::new_in(self.directory())?;
        temp.write_all(contents.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

/// Decode a whole data file
///
/// Errors are `MalformedRecord` or `ChecksumMismatch`; the caller wraps them
/// into `CorruptedStore`.
fn decode_file<E: LineRecord, R: Read>(mut input: R) -> Result<EntityList<E>, LendingError> {
    let mut contents = String::new();
    input.read_to_string(&mut contents)?;

    // The csv reader skips empty lines; every line must hold a record
    if let Some(position) = contents.lines().position(|line| line.trim().is_empty()) {
        return Err(LendingError::malformed_record(format!(
            "line {}: blank line",
            position + 1
        )));
    }

    let mut reader = record_reader(contents.as_bytes());
    let mut records = reader.records();

    let count_record = records
        .next()
        .ok_or_else(|| LendingError::malformed_record("missing record count"))??;
    if count_record.len() != 1 {
        return Err(LendingError::malformed_record(format!(
            "record count line has {} columns",
            count_record.len()
        )));
    }
    let expected: usize = count_record[0].parse().map_err(|_| {
        LendingError::malformed_record(format!("invalid record count '{}'", &count_record[0]))
    })?;

    let mut list = EntityList::new();
    for result in records {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let entity = decode_record::<E>(&record)
            .map_err(|e| LendingError::malformed_record(format!("line {}: {}", line, e)))?;
        if !list.push(entity) {
            return Err(LendingError::malformed_record(format!(
                "line {}: duplicate {} id",
                line,
                E::KIND
            )));
        }
    }

    if list.len() != expected {
        return Err(LendingError::malformed_record(format!(
            "record count {} does not match {} records",
            expected,
            list.len()
        )));
    }

    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::line_format::encode_line;
    use crate::types::{
        Category, Item, ItemId, Transaction, TransactionId, User, UserId,
    };
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn users() -> EntityList<User> {
        let mut list = EntityList::new();
        list.push(User::new(UserId::new("u1"), "Alice"));
        list.push(User::new(UserId::new("u2"), "Bob Builder"));
        list.push(User::new(UserId::new("u3"), "Carol"));
        list
    }

    fn transactions() -> EntityList<Transaction> {
        let mut list = EntityList::new();
        for (id, days) in [("t1", 3), ("t2", 14)] {
            list.push(Transaction::new(
                TransactionId::new(id),
                "Tent",
                ItemId::new("i1"),
                UserId::new("u1"),
                UserId::new("u2"),
                days,
                NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
                Decimal::new(125, 1) * Decimal::from(days),
            ));
        }
        list
    }

    #[test]
    fn test_write_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("users.txt"));

        store.write_data(&users()).unwrap();
        assert_eq!(store.load_data().unwrap(), users());

        let tx_store = Store::new(dir.path().join("transactions.txt"));
        tx_store.write_data(&transactions()).unwrap();
        assert_eq!(tx_store.load_data().unwrap(), transactions());
    }

    #[test]
    fn test_round_trip_empty_list() {
        let dir = TempDir::new().unwrap();
        let store: Store<Item> = Store::new(dir.path().join("items.txt"));

        store.write_data(&EntityList::new()).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "0\n");
        assert!(store.load_data().unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_file_not_found() {
        let dir = TempDir::new().unwrap();
        let store: Store<User> = Store::new(dir.path().join("users.txt"));

        assert!(!store.has_file());
        assert!(matches!(
            store.load_data(),
            Err(LendingError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_write_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("data").join("users.txt"));

        store.write_data(&users()).unwrap();
        assert!(store.has_file());
        assert_eq!(store.load_data().unwrap().len(), 3);
    }

    #[test]
    fn test_write_fails_when_directory_cannot_be_created() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let store = Store::new(blocker.join("nested").join("users.txt"));

        assert!(matches!(
            store.write_data(&users()),
            Err(LendingError::StoreFailure { .. })
        ));
    }

    #[test]
    fn test_write_overwrites_previous_contents() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("users.txt"));

        store.write_data(&users()).unwrap();
        let mut fewer = EntityList::new();
        fewer.push(User::new(UserId::new("u9"), "Zed"));
        store.write_data(&fewer).unwrap();

        assert_eq!(store.load_data().unwrap(), fewer);
    }

    fn write_raw(dir: &TempDir, contents: &str) -> Store<User> {
        let path = dir.path().join("users.txt");
        fs::write(&path, contents).unwrap();
        Store::new(path)
    }

    #[test]
    fn test_count_line_mismatch_is_corruption() {
        let dir = TempDir::new().unwrap();
        let user = User::new(UserId::new("u1"), "Alice");
        let store = write_raw(&dir, &format!("2\n{}\n", encode_line(&user)));

        let error = store.load_data().unwrap_err();
        assert!(error.is_corruption());
        assert!(error.to_string().contains("record count 2 does not match 1 records"));
    }

    #[test]
    fn test_tampered_record_is_corruption() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("users.txt"));
        store.write_data(&users()).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        fs::write(store.path(), contents.replacen("Bob Builder", "Bob Builders", 1)).unwrap();

        assert!(store.load_data().unwrap_err().is_corruption());
    }

    #[test]
    fn test_single_deleted_character_is_corruption() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("transactions.txt"));
        store.write_data(&transactions()).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        fs::write(store.path(), contents.replacen("Tent", "Ten", 1)).unwrap();

        assert!(store.load_data().unwrap_err().is_corruption());
    }

    #[rstest::rstest]
    #[case::empty_file("")]
    #[case::non_numeric_count("two\n")]
    #[case::count_with_extra_column("1 | 2\n")]
    #[case::short_record("1\nu1 | Alice\n")]
    #[case::duplicate_ids("2\nu1 | A | 20\nu1 | A | 20\n")]
    #[case::blank_line_before_record("1\n\nu1 | A | 20\n")]
    #[case::blank_line_between_records("2\nu1 | A | 20\n\nu2 | B | 20\n")]
    #[case::blank_line_before_count("\n1\nu1 | A | 20\n")]
    fn test_malformed_files_are_corruption(#[case] contents: &str) {
        let dir = TempDir::new().unwrap();
        let store = write_raw(&dir, contents);
        assert!(store.load_data().unwrap_err().is_corruption());
    }

    #[test]
    fn test_well_formed_file_without_trailing_newline_loads() {
        let dir = TempDir::new().unwrap();
        let store = write_raw(&dir, "2\nu1 | A | 20\nu2 | B | 20");
        assert_eq!(store.load_data().unwrap().len(), 2);
    }

    #[test]
    fn test_item_store_round_trip_keeps_availability() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("items.txt"));

        let mut items = EntityList::new();
        let mut lent = Item::new(
            ItemId::new("i1"),
            "Tent",
            Category::Sports,
            Decimal::new(125, 1),
            UserId::new("u1"),
        )
        .unwrap();
        lent.set_available(false);
        items.push(lent);
        items.push(
            Item::new(
                ItemId::new("i2"),
                "Kettle",
                Category::Household,
                Decimal::ZERO,
                UserId::new("u2"),
            )
            .unwrap(),
        );

        store.write_data(&items).unwrap();
        let loaded = store.load_data().unwrap();
        assert_eq!(loaded, items);
        assert!(!loaded.get("i1").unwrap().is_available());
    }
}
