//! Common types used across the application

use serde::{Deserialize, Serialize};

/// A purchasable catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    /// Unique, compared case-insensitively
    pub name: String,
    pub category: Option<String>,
    pub price: f64,
}

/// A persisted, completed checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub transaction_id: i64,
    /// Unix timestamp in milliseconds, refreshed on every update
    pub order_date: i64,
    /// Flattened line items, e.g. `Glazed Donut x2 [Icing: Maple]; Latte x1`
    pub items: String,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl Order {
    /// Order date as a local date-time, if the stored timestamp is in range
    pub fn order_datetime(&self) -> Option<chrono::DateTime<chrono::Local>> {
        chrono::DateTime::<chrono::Utc>::from_timestamp_millis(self.order_date)
            .map(|utc| utc.with_timezone(&chrono::Local))
    }
}

/// Derived monetary amounts for an order
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

/// Non-fatal warning raised when an edited order's total disagrees with
/// its subtotal and tax
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TotalsMismatch {
    pub expected_total: f64,
    pub entered_total: f64,
    pub difference: f64,
}
