//! Benchmark suite for the data file stores
//!
//! Measures writing and loading a whole list through `Store`, including
//! checksum computation and verification.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```

use chrono::NaiveDate;
use lending_pool::core::EntityList;
use lending_pool::storage::Store;
use lending_pool::{Category, Item, ItemId, Transaction, TransactionId, UserId};
use rust_decimal::Decimal;
use tempfile::TempDir;

fn main() {
    divan::main();
}

fn items(count: usize) -> EntityList<Item> {
    let mut list = EntityList::new();
    for n in 0..count {
        let item = Item::new(
            ItemId::new(format!("i{:07}", n)),
            format!("Item number {}", n),
            Category::ALL[n % Category::ALL.len()],
            Decimal::new(n as i64 % 5000, 2),
            UserId::new(format!("u{:07}", n % 100)),
        )
        .expect("valid item");
        list.push(item);
    }
    list
}

fn transactions(count: usize) -> EntityList<Transaction> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
    let mut list = EntityList::new();
    for n in 0..count {
        list.push(Transaction::new(
            TransactionId::new(format!("t{:07}", n)),
            format!("Item number {}", n),
            ItemId::new(format!("i{:07}", n)),
            UserId::new(format!("u{:07}", n % 100)),
            UserId::new(format!("u{:07}", (n + 1) % 100)),
            (n % 30 + 1) as u32,
            start,
            Decimal::new(n as i64, 1),
        ));
    }
    list
}

/// Write an item list of the given size
#[divan::bench(args = [100, 1_000, 10_000])]
fn write_items(bencher: divan::Bencher, count: usize) {
    let dir = TempDir::new().expect("temp dir");
    let store = Store::new(dir.path().join("items.txt"));
    let list = items(count);

    bencher.bench_local(|| store.write_data(&list).expect("write failed"));
}

/// Load and verify an item list of the given size
#[divan::bench(args = [100, 1_000, 10_000])]
fn load_items(bencher: divan::Bencher, count: usize) {
    let dir = TempDir::new().expect("temp dir");
    let store: Store<Item> = Store::new(dir.path().join("items.txt"));
    store.write_data(&items(count)).expect("write failed");

    bencher.bench_local(|| store.load_data().expect("load failed"));
}

/// Load and verify a transaction list of the given size
#[divan::bench(args = [100, 1_000, 10_000])]
fn load_transactions(bencher: divan::Bencher, count: usize) {
    let dir = TempDir::new().expect("temp dir");
    let store: Store<Transaction> = Store::new(dir.path().join("transactions.txt"));
    store.write_data(&transactions(count)).expect("write failed");

    bencher.bench_local(|| store.load_data().expect("load failed"));
}
