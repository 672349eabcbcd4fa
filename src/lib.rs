//! Donut POS library
//!
//! Menu catalog, order ledger and order builder for the shop's till.
//! Front-ends open a [`db::Database`], take [`db::MenuCatalog`] and
//! [`db::OrderLedger`] handles from it, and ring orders up with an
//! [`order::OrderBuilder`] priced by a [`pricing::PricingEngine`].

pub mod core;
pub mod db;
pub mod order;
pub mod pricing;
