//! Transaction types for the lending pool
//!
//! A transaction records one item lent by its owner to a borrower for a
//! number of days. Return date and overdue status are derived, never stored.

use super::ids::{ItemId, TransactionId, UserId};
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use std::fmt;

/// A lending transaction
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    id: TransactionId,

    /// Snapshot of the item name when the item was lent
    item_name: String,
    item_id: ItemId,

    /// The item owner
    lender_id: UserId,
    borrower_id: UserId,

    /// Lending period in days, always positive
    duration: u32,
    created_at: NaiveDate,

    /// Price per day times duration, fixed at creation
    money_transacted: Decimal,
    is_finished: bool,
}

impl Transaction {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: TransactionId,
        item_name: impl Into<String>,
        item_id: ItemId,
        lender_id: UserId,
        borrower_id: UserId,
        duration: u32,
        created_at: NaiveDate,
        money_transacted: Decimal,
    ) -> Self {
        Transaction {
            id,
            item_name: item_name.into().trim().to_string(),
            item_id,
            lender_id,
            borrower_id,
            duration,
            created_at,
            money_transacted,
            is_finished: false,
        }
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    pub fn lender_id(&self) -> &UserId {
        &self.lender_id
    }

    pub fn borrower_id(&self) -> &UserId {
        &self.borrower_id
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn created_at(&self) -> NaiveDate {
        self.created_at
    }

    pub fn money_transacted(&self) -> Decimal {
        self.money_transacted
    }

    pub fn is_finished(&self) -> bool {
        self.is_finished
    }

    #[cfg(test)]
    pub(crate) fn set_finished(&mut self, finished: bool) {
        self.is_finished = finished;
    }

    /// Whether `user` is the lender or the borrower
    pub fn involves(&self, user: &UserId) -> bool {
        &self.lender_id == user || &self.borrower_id == user
    }

    /// `created_at + duration`, saturating at the largest representable date
    pub fn return_date(&self) -> NaiveDate {
        self.created_at
            .checked_add_days(Days::new(u64::from(self.duration)))
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_finished && self.return_date() < today
    }

    /// Default rendering followed by the return status relative to `today`
    ///
    /// The status is kept out of `Display` because `Display` feeds the record
    /// checksum, which must not change from one day to the next.
    pub fn describe(&self, today: NaiveDate) -> String {
        let status = if self.is_finished {
            "returned".to_string()
        } else if self.is_overdue(today) {
            format!(
                "{} day(s) overdue",
                (today - self.return_date()).num_days()
            )
        } else {
            format!(
                "{} day(s) remaining",
                (self.return_date() - today).num_days()
            )
        };
        format!("{} ({})", self, status)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] TransactionID: {} Item: {} (ID: {}) LenderID: {} BorrowerID: {} \
             Duration: {} day(s) CreatedAt: {} MoneyTransacted: {} ReturnDate: {}",
            if self.is_finished { "X" } else { " " },
            self.id,
            self.item_name,
            self.item_id,
            self.lender_id,
            self.borrower_id,
            self.duration,
            self.created_at,
            self.money_transacted,
            self.return_date()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn lend(created_at: NaiveDate, duration: u32) -> Transaction {
        Transaction::new(
            TransactionId::new("t1"),
            "Drill",
            ItemId::new("i1"),
            UserId::new("u1"),
            UserId::new("u2"),
            duration,
            created_at,
            Decimal::new(15, 0) * Decimal::from(duration),
        )
    }

    #[test]
    fn test_return_date() {
        let tx = lend(date(2024, 2, 27), 3);
        assert_eq!(tx.return_date(), date(2024, 3, 1));
    }

    #[test]
    fn test_overdue_detection() {
        let today = date(2024, 6, 20);
        let tx = lend(date(2024, 6, 10), 5);
        assert!(tx.is_overdue(today));
        assert!(tx.describe(today).ends_with("(5 day(s) overdue)"));
    }

    #[rstest]
    #[case::due_today(date(2024, 6, 15), "(0 day(s) remaining)")]
    #[case::due_later(date(2024, 6, 12), "(3 day(s) remaining)")]
    fn test_not_overdue(#[case] today: NaiveDate, #[case] suffix: &str) {
        let tx = lend(date(2024, 6, 10), 5);
        assert!(!tx.is_overdue(today));
        assert!(tx.describe(today).ends_with(suffix));
    }

    #[test]
    fn test_finished_transaction_is_never_overdue() {
        let today = date(2024, 6, 20);
        let mut tx = lend(date(2024, 6, 10), 5);
        tx.set_finished(true);
        assert!(!tx.is_overdue(today));
        assert!(tx.describe(today).ends_with("(returned)"));
        assert!(tx.to_string().starts_with("[X]"));
    }

    #[test]
    fn test_rendering_is_independent_of_today() {
        let tx = lend(date(2024, 6, 10), 5);
        let rendered = tx.to_string();
        assert!(rendered.contains("ReturnDate: 2024-06-15"));
        assert!(!rendered.contains("overdue"));
        assert!(!rendered.contains("remaining"));
    }

    #[test]
    fn test_involves() {
        let tx = lend(date(2024, 6, 10), 5);
        assert!(tx.involves(&UserId::new("u1")));
        assert!(tx.involves(&UserId::new("u2")));
        assert!(!tx.involves(&UserId::new("u3")));
    }
}
