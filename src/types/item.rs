//! Item types for the lending pool
//!
//! This module defines the Item structure and the closed set of item
//! categories it can belong to.

use super::error::LendingError;
use super::ids::{ItemId, UserId};
use rust_decimal::Decimal;
use std::fmt;

/// Item categories
///
/// Categories are chosen at the prompt by a small integer code, which is also
/// what the item file stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Electronics,
    Household,
    Tools,
    Sports,
    Books,
    Others,
}

impl Category {
    /// All categories in code order
    pub const ALL: [Category; 6] = [
        Category::Electronics,
        Category::Household,
        Category::Tools,
        Category::Sports,
        Category::Books,
        Category::Others,
    ];

    /// Map a category code to a category
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for any code outside `1..=6`.
    pub fn from_code(code: u8) -> Result<Self, LendingError> {
        match code {
            1 => Ok(Category::Electronics),
            2 => Ok(Category::Household),
            3 => Ok(Category::Tools),
            4 => Ok(Category::Sports),
            5 => Ok(Category::Books),
            6 => Ok(Category::Others),
            _ => Err(LendingError::invalid_argument(format!(
                "Category code {} does not exist, choose a code from 1 to {}",
                code,
                Self::ALL.len()
            ))),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Category::Electronics => 1,
            Category::Household => 2,
            Category::Tools => 3,
            Category::Sports => 4,
            Category::Books => 5,
            Category::Others => 6,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Electronics => "ELECTRONICS",
            Category::Household => "HOUSEHOLD",
            Category::Tools => "TOOLS",
            Category::Sports => "SPORTS",
            Category::Books => "BOOKS",
            Category::Others => "OTHERS",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An item offered for lending
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: ItemId,
    name: String,
    category: Category,

    /// Daily lending price, never negative
    price_per_day: Decimal,

    /// The owning user, by id
    owner_id: UserId,

    /// False while the item is lent out
    is_available: bool,
}

impl Item {
    /// Create a new, available item
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the price is negative.
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        category: Category,
        price_per_day: Decimal,
        owner_id: UserId,
    ) -> Result<Self, LendingError> {
        validate_price(price_per_day)?;
        Ok(Item {
            id,
            name: name.into().trim().to_string(),
            category,
            price_per_day,
            owner_id,
            is_available: true,
        })
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn price_per_day(&self) -> Decimal {
        self.price_per_day
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn is_available(&self) -> bool {
        self.is_available
    }

    pub fn set_available(&mut self, available: bool) {
        self.is_available = available;
    }

    /// Change the daily price
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the price is negative; the item is unchanged.
    pub fn update_price(&mut self, price_per_day: Decimal) -> Result<(), LendingError> {
        validate_price(price_per_day)?;
        self.price_per_day = price_per_day;
        Ok(())
    }
}

fn validate_price(price: Decimal) -> Result<(), LendingError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(LendingError::invalid_argument(format!(
            "Price {} cannot be negative",
            price
        )));
    }
    Ok(())
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] Item: {} (ID: {}) Category: {} Owner: {} PricePerDay: {}",
            if self.is_available { "Y" } else { "N" },
            self.name,
            self.id,
            self.category,
            self.owner_id,
            self.price_per_day
        )
    }
}
