//! Formatted views of the domain lists
//!
//! Pure functions that turn entities into the text the console prints.

use crate::core::{Entity, EntityList, TransactionList};
use crate::types::{Item, Transaction, User};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt::Write;

/// Numbered listing of any domain list
pub fn list_view<E: Entity>(list: &EntityList<E>) -> String {
    if list.is_empty() {
        return format!("There are no {}s in the list", E::KIND);
    }
    numbered(
        &format!("Here are {} {}(s) in the list:", list.len(), E::KIND),
        list.iter().map(ToString::to_string),
    )
}

/// Numbered listing of transactions with their return status
pub fn transaction_list_view(transactions: &TransactionList, today: NaiveDate) -> String {
    if transactions.is_empty() {
        return "There are no transactions in the list".to_string();
    }
    numbered(
        &format!(
            "Here are {} transaction(s) in the list:",
            transactions.len()
        ),
        transactions.iter().map(|tx| tx.describe(today)),
    )
}

/// Listing of items found by a search
pub fn search_view(keyword: &str, items: &[&Item]) -> String {
    if items.is_empty() {
        return format!("No items match '{}'", keyword);
    }
    numbered(
        &format!("Here are {} item(s) matching '{}':", items.len(), keyword),
        items.iter().map(ToString::to_string),
    )
}

/// Detailed view of one user: profile, items owned, money spent and earned
pub fn user_view(
    user: &User,
    items: &[&Item],
    money_spent: Decimal,
    money_earned: Decimal,
) -> String {
    let mut view = format!("Here is the user you requested:\n{}\n", user);
    if items.is_empty() {
        view.push_str("Items owned: none\n");
    } else {
        view.push_str("Items owned:\n");
        for (position, item) in items.iter().enumerate() {
            let _ = writeln!(view, "   {}. {}", position + 1, item);
        }
    }
    let _ = write!(
        view,
        "Money spent borrowing: {}\nMoney earned lending: {}",
        money_spent, money_earned
    );
    view
}

pub fn item_view(item: &Item) -> String {
    format!("Here is the item you requested:\n{}", item)
}

pub fn transaction_view(tx: &Transaction, today: NaiveDate) -> String {
    format!(
        "Here is the transaction you requested:\n{}",
        tx.describe(today)
    )
}

fn numbered<I>(header: &str, lines: I) -> String
where
    I: Iterator<Item = String>,
{
    let mut view = header.to_string();
    for (position, line) in lines.enumerate() {
        let _ = write!(view, "\n   {}. {}", position + 1, line);
    }
    view
}
