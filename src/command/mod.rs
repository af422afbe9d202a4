//! Command module
//!
//! - `parser` - Turns an input line into a `Command`
//! - `commands` - The `Command` enum and what each command does

pub mod commands;
pub mod parser;

pub use commands::Command;
pub use parser::create_command;
