//! Order builder for the order currently being rung up
//!
//! Line items live only in memory until checkout, when the order is
//! flattened into a text summary and stored in the ledger.

use crate::core::{Error, MenuItem, OrderTotals, Result};
use crate::db::{MenuCatalog, OrderLedger};
use crate::pricing::PricingEngine;
use serde::{Deserialize, Serialize};

/// Option value meaning "no choice made"
const NO_CHOICE: &str = "None";

/// Icing and filling choices for a line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineOptions {
    pub icing: Option<String>,
    pub filling: Option<String>,
}

fn normalize_choice(choice: Option<&str>) -> Option<String> {
    choice
        .map(str::trim)
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(NO_CHOICE))
        .map(str::to_string)
}

impl LineOptions {
    /// Build options from picker values; empty and `"None"` mean no choice
    pub fn new(icing: Option<&str>, filling: Option<&str>) -> Self {
        Self {
            icing: normalize_choice(icing),
            filling: normalize_choice(filling),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.icing.is_none() && self.filling.is_none()
    }

    /// `Icing: Maple, Filling: Jam`, or `-` when nothing was chosen
    pub fn description(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        if let Some(icing) = &self.icing {
            parts.push(format!("Icing: {}", icing));
        }
        if let Some(filling) = &self.filling {
            parts.push(format!("Filling: {}", filling));
        }

        if parts.is_empty() {
            "-".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// One row of the order being built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub item_name: String,
    pub options: LineOptions,
    pub quantity: u32,
    pub unit_price: f64,
}

impl OrderLineItem {
    pub fn new(item_name: &str, options: LineOptions, quantity: u32, unit_price: f64) -> Self {
        Self {
            item_name: item_name.to_string(),
            options,
            quantity,
            unit_price,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }

    /// `Glazed Donut x2 [Icing: Maple]`
    pub fn summary(&self) -> String {
        if self.options.is_empty() {
            format!("{} x{}", self.item_name, self.quantity)
        } else {
            format!("{} x{} [{}]", self.item_name, self.quantity, self.options.description())
        }
    }
}

/// Where the order being built stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderState {
    Empty,
    Building,
}

/// Result of a successful checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub transaction_id: i64,
    pub items: String,
    pub totals: OrderTotals,
}

fn check_quantity(quantity: u32) -> Result<()> {
    if quantity == 0 {
        return Err(Error::Validation("quantity must be at least 1".to_string()));
    }
    Ok(())
}

/// Accumulates line items and commits them to the ledger on checkout
#[derive(Debug, Clone, Default)]
pub struct OrderBuilder {
    lines: Vec<OrderLineItem>,
}

impl OrderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> OrderState {
        if self.lines.is_empty() {
            OrderState::Empty
        } else {
            OrderState::Building
        }
    }

    pub fn lines(&self) -> &[OrderLineItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Append a line for a menu item at its current price; returns the
    /// line index
    pub fn add_item(&mut self, item: &MenuItem, quantity: u32, options: LineOptions) -> Result<usize> {
        check_quantity(quantity)?;
        self.lines
            .push(OrderLineItem::new(&item.name, options, quantity, item.price));
        Ok(self.lines.len() - 1)
    }

    /// Append a line for the catalog item with this name (ignoring case)
    pub fn add_from_catalog(
        &mut self,
        catalog: &MenuCatalog<'_>,
        name: &str,
        quantity: u32,
        options: LineOptions,
    ) -> Result<usize> {
        let item = catalog
            .find_by_name(name)?
            .ok_or_else(|| Error::UnknownMenuItem(name.to_string()))?;
        self.add_item(&item, quantity, options)
    }

    pub fn remove_line(&mut self, index: usize) -> Option<OrderLineItem> {
        if index < self.lines.len() {
            Some(self.lines.remove(index))
        } else {
            None
        }
    }

    /// Change a line's quantity; the line total follows from the unit price
    pub fn set_quantity(&mut self, index: usize, quantity: u32) -> Result<()> {
        check_quantity(quantity)?;
        let line = self
            .lines
            .get_mut(index)
            .ok_or_else(|| Error::Validation(format!("no order line at index {}", index)))?;
        line.quantity = quantity;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn totals(&self, pricing: &PricingEngine) -> OrderTotals {
        pricing.totals(&self.lines)
    }

    /// `Glazed Donut x2 [Icing: Maple]; Latte x1`
    pub fn items_summary(&self) -> String {
        self.lines
            .iter()
            .map(OrderLineItem::summary)
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Store the order and reset the builder
    ///
    /// On failure the lines are kept so the cashier can try again.
    pub fn checkout(&mut self, ledger: &OrderLedger<'_>, pricing: &PricingEngine) -> Result<Receipt> {
        if self.lines.is_empty() {
            return Err(Error::EmptyOrder);
        }

        let totals = pricing.round_totals(self.totals(pricing));
        let items = self.items_summary();

        let transaction_id = ledger.save(&items, totals.subtotal, totals.tax, totals.total)?;
        log::info!(
            "Checkout complete: transaction {} for {}",
            transaction_id,
            pricing.format(totals.total)
        );

        self.lines.clear();
        Ok(Receipt {
            transaction_id,
            items,
            totals,
        })
    }
}
