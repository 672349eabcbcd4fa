//! Pricing engine for order totals
//!
//! Everything money-related the till needs:
//! - Subtotal, flat-rate tax and total for the order being built
//! - Rounding to currency precision
//! - Formatting amounts for display and parsing amounts typed by staff
//! - The subtotal + tax = total check used when editing stored orders

use crate::core::{Error, OrderTotals, PricingConfig, Result, TotalsMismatch};
use crate::order::OrderLineItem;

/// Pricing engine that calculates order totals
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    /// Create a new pricing engine with the given configuration
    pub fn new(config: &PricingConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Update the pricing configuration
    pub fn update_config(&mut self, config: &PricingConfig) {
        self.config = config.clone();
    }

    pub fn tax_rate(&self) -> f64 {
        self.config.tax_rate
    }

    /// Get the currency symbol
    pub fn currency_symbol(&self) -> &str {
        &self.config.currency_symbol
    }

    /// Tax owed on a subtotal
    pub fn tax_for(&self, subtotal: f64) -> f64 {
        subtotal * self.config.tax_rate
    }

    /// Subtotal plus tax
    pub fn total_for(&self, subtotal: f64) -> f64 {
        subtotal + self.tax_for(subtotal)
    }

    /// Unrounded totals for a set of line items
    pub fn totals(&self, lines: &[OrderLineItem]) -> OrderTotals {
        let subtotal: f64 = lines.iter().map(OrderLineItem::line_total).sum();
        self.totals_for_subtotal(subtotal)
    }

    pub fn totals_for_subtotal(&self, subtotal: f64) -> OrderTotals {
        let tax = self.tax_for(subtotal);
        OrderTotals {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    /// Round to the configured number of decimals
    pub fn round_currency(&self, amount: f64) -> f64 {
        let factor = 10f64.powi(self.config.decimals as i32);
        (amount * factor).round() / factor
    }

    /// Round each amount independently to currency precision
    pub fn round_totals(&self, totals: OrderTotals) -> OrderTotals {
        OrderTotals {
            subtotal: self.round_currency(totals.subtotal),
            tax: self.round_currency(totals.tax),
            total: self.round_currency(totals.total),
        }
    }

    /// Format an amount for display, e.g. `$1,234.50` or `-$0.75`
    pub fn format(&self, amount: f64) -> String {
        let decimals = self.config.decimals as usize;
        let rounded = self.round_currency(amount);
        let digits = format!("{:.*}", decimals, rounded.abs());

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (digits.as_str(), None),
        };

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if rounded < 0.0 { "-" } else { "" };
        match frac_part {
            Some(frac) => format!("{}{}{}.{}", sign, self.config.currency_symbol, grouped, frac),
            None => format!("{}{}{}", sign, self.config.currency_symbol, grouped),
        }
    }

    /// Parse an amount typed by staff: `$1,234.50`, `1234.5` and ` 3 ` are
    /// all accepted
    pub fn parse_amount(&self, text: &str) -> Result<f64> {
        let symbol = self.config.currency_symbol.as_str();
        let without_symbol = if symbol.is_empty() {
            text.to_string()
        } else {
            text.replace(symbol, "")
        };

        let cleaned: String = without_symbol
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .collect();

        if cleaned.is_empty() {
            return Err(Error::Validation("amount is empty".to_string()));
        }

        match cleaned.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(Error::Validation(format!("'{}' is not a valid amount", text.trim()))),
        }
    }

    /// Warn when an edited order's total drifts from subtotal + tax by more
    /// than the configured tolerance
    pub fn check_totals(&self, subtotal: f64, tax: f64, total: f64) -> Option<TotalsMismatch> {
        let expected_total = subtotal + tax;
        let difference = total - expected_total;

        if difference.abs() > self.config.mismatch_tolerance {
            log::warn!(
                "Order total {:.2} differs from subtotal + tax {:.2}",
                total,
                expected_total
            );
            Some(TotalsMismatch {
                expected_total,
                entered_total: total,
                difference,
            })
        } else {
            None
        }
    }

    /// Label for the tax line, e.g. `Tax (6%)`
    pub fn tax_label(&self) -> String {
        let percent = (self.config.tax_rate * 100.0 * 100.0).round() / 100.0;
        format!("Tax ({}%)", percent)
    }
}
