//! Order history: the `orders` table

use crate::core::{Order, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Longest items summary the `orders` table accepts
pub const MAX_ITEMS_LEN: usize = 4000;

/// Handle over the stored orders
pub struct OrderLedger<'db> {
    conn: &'db Connection,
}

fn order_from_row(row: &Row<'_>) -> rusqlite::Result<Order> {
    Ok(Order {
        transaction_id: row.get(0)?,
        order_date: row.get(1)?,
        items: row.get(2)?,
        subtotal: row.get(3)?,
        tax: row.get(4)?,
        total: row.get(5)?,
    })
}

impl<'db> OrderLedger<'db> {
    pub(crate) fn new(conn: &'db Connection) -> Self {
        Self { conn }
    }

    /// Store a completed order and return its transaction id
    ///
    /// Amounts are stored as given; no consistency check is made between
    /// subtotal, tax and total.
    pub fn save(&self, items: &str, subtotal: f64, tax: f64, total: f64) -> Result<i64> {
        let now = chrono::Utc::now().timestamp_millis();

        self.conn.execute(
            "INSERT INTO orders (order_date, items, subtotal, tax, total)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![now, items, subtotal, tax, total],
        )?;

        let transaction_id = self.conn.last_insert_rowid();
        log::debug!("Saved order {} (total {:.2})", transaction_id, total);
        Ok(transaction_id)
    }

    /// Overwrite an order; `Ok(false)` when the id does not exist
    ///
    /// The order date is reset to the time of the update.
    pub fn update(&self, transaction_id: i64, items: &str, subtotal: f64, tax: f64, total: f64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp_millis();

        let changed = self.conn.execute(
            "UPDATE orders SET order_date = ?1, items = ?2, subtotal = ?3, tax = ?4, total = ?5
             WHERE transaction_id = ?6",
            params![now, items, subtotal, tax, total, transaction_id],
        )?;

        log::debug!("Update order {}: {} row(s)", transaction_id, changed);
        Ok(changed > 0)
    }

    /// Delete an order; `Ok(false)` when the id does not exist
    pub fn delete(&self, transaction_id: i64) -> Result<bool> {
        let deleted = self.conn.execute(
            "DELETE FROM orders WHERE transaction_id = ?1",
            params![transaction_id],
        )?;

        log::debug!("Delete order {}: {} row(s)", transaction_id, deleted);
        Ok(deleted > 0)
    }

    /// All orders, most recent transaction first
    pub fn list(&self) -> Result<Vec<Order>> {
        let mut stmt = self.conn.prepare(
            "SELECT transaction_id, order_date, items, subtotal, tax, total
             FROM orders ORDER BY transaction_id DESC",
        )?;

        let orders = stmt
            .query_map([], order_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(orders)
    }

    /// Get a specific order by transaction id
    pub fn get(&self, transaction_id: i64) -> Result<Option<Order>> {
        let order = self
            .conn
            .query_row(
                "SELECT transaction_id, order_date, items, subtotal, tax, total
                 FROM orders WHERE transaction_id = ?1",
                params![transaction_id],
                order_from_row,
            )
            .optional()?;
        Ok(order)
    }

    pub fn len(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM orders", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
