//! Line format for the data files
//!
//! This module centralizes all record format concerns, providing:
//! - `LineRecord`, the column layout of each entity kind
//! - Encoding of one entity to a ` | ` separated line with a trailing checksum
//! - Decoding of one parsed record back into an entity, with checksum verification
//! - The csv reader configuration used by the stores
//!
//! All functions are pure (no file I/O) for easy testing.
//!
//! # Checksum
//!
//! The record checksum is the character count of the entity's `Display`
//! rendering. It catches hand edits and truncation, nothing more; it is not a
//! cryptographic digest.

use crate::core::{Entity, EntityList};
use crate::types::{
    Category, Item, ItemId, LendingError, Transaction, TransactionId, User, UserId,
};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::io::Read;
use std::str::FromStr;

/// Separator written between columns
pub const FIELD_SEPARATOR: &str = " | ";

/// Column layout of an entity kind in its data file
pub trait LineRecord: Entity + Sized {
    /// Typed row the csv deserializer fills in, checksum column included
    type Row: DeserializeOwned;

    /// Number of columns, checksum included
    const COLUMNS: usize;

    /// The data columns in file order, checksum excluded
    fn to_fields(&self) -> Vec<String>;

    /// Rebuild the entity from a row
    ///
    /// # Returns
    ///
    /// The entity and the checksum stored alongside it.
    fn from_row(row: Self::Row) -> Result<(Self, usize), LendingError>;
}

/// Checksum of a single record: length of its default rendering
pub fn record_checksum<E: fmt::Display>(entity: &E) -> usize {
    entity.to_string().chars().count()
}

/// Encode one entity as a line (without trailing newline)
pub fn encode_line<E: LineRecord>(entity: &E) -> String {
    let mut fields: Vec<String> = entity
        .to_fields()
        .into_iter()
        .map(|field| field.trim().to_string())
        .collect();
    fields.push(record_checksum(entity).to_string());
    fields.join(FIELD_SEPARATOR)
}

/// Encode a whole list: record count line, then one line per entity
pub fn encode_list<E: LineRecord>(list: &EntityList<E>) -> String {
    let mut output = format!("{}\n", list.len());
    for entity in list {
        output.push_str(&encode_line(entity));
        output.push('\n');
    }
    output
}

/// Decode one parsed record into an entity
///
/// # Errors
///
/// * `MalformedRecord` - Wrong column count or a column failed to parse
/// * `ChecksumMismatch` - The stored checksum disagrees with the rebuilt entity
pub fn decode_record<E: LineRecord>(record: &StringRecord) -> Result<E, LendingError> {
    if record.len() != E::COLUMNS {
        return Err(LendingError::malformed_record(format!(
            "{} record has {} columns, expected {}",
            E::KIND,
            record.len(),
            E::COLUMNS
        )));
    }

    let row: E::Row = record.deserialize(None)?;
    let (entity, stored) = E::from_row(row)?;

    let computed = record_checksum(&entity);
    if computed != stored {
        return Err(LendingError::ChecksumMismatch { stored, computed });
    }

    Ok(entity)
}

/// Decode a single line of text
pub fn decode_line<E: LineRecord>(line: &str) -> Result<E, LendingError> {
    let mut reader = record_reader(line.as_bytes());
    let mut record = StringRecord::new();
    if !reader.read_record(&mut record)? {
        return Err(LendingError::malformed_record("empty line"));
    }
    decode_record(&record)
}

/// csv reader configured for the data file format
///
/// Columns are separated by `|` and trimmed; there is no header and no
/// quoting, and records may have differing lengths (the count line has one
/// column) so that arity is checked per record instead.
pub fn record_reader<R: Read>(input: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .quoting(false)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(input)
}

fn required(value: String, column: &str) -> Result<String, LendingError> {
    if value.is_empty() {
        return Err(LendingError::malformed_record(format!(
            "column '{}' is empty",
            column
        )));
    }
    Ok(value)
}

fn parse_decimal(value: &str, column: &str) -> Result<Decimal, LendingError> {
    Decimal::from_str(value).map_err(|e| {
        LendingError::malformed_record(format!("column '{}': invalid number '{}': {}", column, value, e))
    })
}

/// User columns: id, name, checksum
#[derive(Debug, Deserialize)]
pub struct UserRow {
    id: String,
    name: String,
    checksum: usize,
}

impl LineRecord for User {
    type Row = UserRow;
    const COLUMNS: usize = 3;

    fn to_fields(&self) -> Vec<String> {
        vec![self.id().to_string(), self.name().to_string()]
    }

    fn from_row(row: UserRow) -> Result<(Self, usize), LendingError> {
        let user = User::new(
            UserId::new(required(row.id, "id")?),
            required(row.name, "name")?,
        );
        Ok((user, row.checksum))
    }
}

/// Item columns: id, name, category code, price per day, owner id, available, checksum
#[derive(Debug, Deserialize)]
pub struct ItemRow {
    id: String,
    name: String,
    category: u8,
    price_per_day: String,
    owner_id: String,
    available: bool,
    checksum: usize,
}

impl LineRecord for Item {
    type Row = ItemRow;
    const COLUMNS: usize = 7;

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id().to_string(),
            self.name().to_string(),
            self.category().code().to_string(),
            self.price_per_day().to_string(),
            self.owner_id().to_string(),
            self.is_available().to_string(),
        ]
    }

    fn from_row(row: ItemRow) -> Result<(Self, usize), LendingError> {
        let category = Category::from_code(row.category)
            .map_err(|e| LendingError::malformed_record(e.to_string()))?;
        let price = parse_decimal(&row.price_per_day, "price_per_day")?;

        let mut item = Item::new(
            ItemId::new(required(row.id, "id")?),
            required(row.name, "name")?,
            category,
            price,
            UserId::new(required(row.owner_id, "owner_id")?),
        )
        .map_err(|e| LendingError::malformed_record(e.to_string()))?;
        item.set_available(row.available);

        Ok((item, row.checksum))
    }
}

/// Transaction columns: id, item name, item id, lender id, borrower id,
/// duration, created at, money transacted, checksum
#[derive(Debug, Deserialize)]
pub struct TransactionRow {
    id: String,
    item_name: String,
    item_id: String,
    lender_id: String,
    borrower_id: String,
    duration: u32,
    created_at: NaiveDate,
    money_transacted: String,
    checksum: usize,
}

impl LineRecord for Transaction {
    type Row = TransactionRow;
    const COLUMNS: usize = 9;

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id().to_string(),
            self.item_name().to_string(),
            self.item_id().to_string(),
            self.lender_id().to_string(),
            self.borrower_id().to_string(),
            self.duration().to_string(),
            self.created_at().format("%Y-%m-%d").to_string(),
            self.money_transacted().to_string(),
        ]
    }

    fn from_row(row: TransactionRow) -> Result<(Self, usize), LendingError> {
        if row.duration == 0 {
            return Err(LendingError::malformed_record(
                "column 'duration' must be positive",
            ));
        }
        let money = parse_decimal(&row.money_transacted, "money_transacted")?;

        let tx = Transaction::new(
            TransactionId::new(required(row.id, "id")?),
            required(row.item_name, "item_name")?,
            ItemId::new(required(row.item_id, "item_id")?),
            UserId::new(required(row.lender_id, "lender_id")?),
            UserId::new(required(row.borrower_id, "borrower_id")?),
            row.duration,
            row.created_at,
            money,
        );

        Ok((tx, row.checksum))
    }
}
