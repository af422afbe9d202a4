//! Community Lending Pool CLI
//!
//! Interactive console for lending and borrowing items.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --data-dir ~/.lending-pool
//! RUST_LOG=lending_pool=debug cargo run
//! ```
//!
//! Commands are read from stdin one per line; the data files are saved when
//! the session ends with `exit` or at the end of input.
//!
//! # Exit Codes
//!
//! - 0: Success, or a corrupted data set the user chose not to reset
//! - 1: Error (data files partially deleted, data could not be saved, etc.)

use lending_pool::cli;
use lending_pool::{ConsoleUi, Session, StorageManager};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = cli::parse_args();

    // RUST_LOG wins over --log-level; logs go to stderr so they never mix
    // with the console output
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let storage = StorageManager::in_dir(&args.data_dir);
    let mut ui = ConsoleUi::stdio();

    if let Err(e) = Session::new(&storage).run(&mut ui) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
