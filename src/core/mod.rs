//! Core module - Configuration, errors, and common types

mod config;
mod error;
mod types;

pub use config::{Config, DatabaseConfig, MenuConfig, OptionsConfig, PricingConfig};
pub use error::{Error, Result};
pub use types::{MenuItem, Order, OrderTotals, TotalsMismatch};
