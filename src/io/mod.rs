//! I/O module
//!
//! Handles the data file line format and the console.
//!
//! # Components
//!
//! - `line_format` - Record encoding/decoding and checksums
//! - `console` - The `Ui` trait and its reader/writer implementation
//! - `views` - Formatted text for users, items and transactions

pub mod console;
pub mod line_format;
pub mod views;

pub use console::{ConsoleUi, Ui};
pub use line_format::{decode_record, encode_line, encode_list, record_checksum, LineRecord};
