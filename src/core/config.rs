//! Configuration management

use crate::core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub menu: MenuConfig,
    #[serde(default)]
    pub options: OptionsConfig,
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

        let app_config_dir = config_dir.join("donut-pos");

        if !app_config_dir.exists() {
            fs::create_dir_all(&app_config_dir)?;
        }

        Ok(app_config_dir.join("config.toml"))
    }

    /// Load configuration from disk, writing the defaults on first run
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let pricing = &self.pricing;
        if !pricing.tax_rate.is_finite() || pricing.tax_rate < 0.0 {
            return Err(Error::Config(format!("tax_rate must be >= 0, got {}", pricing.tax_rate)));
        }
        if pricing.decimals > 6 {
            return Err(Error::Config(format!("decimals must be <= 6, got {}", pricing.decimals)));
        }
        if !pricing.mismatch_tolerance.is_finite() || pricing.mismatch_tolerance < 0.0 {
            return Err(Error::Config("mismatch_tolerance must be >= 0".to_string()));
        }
        Ok(())
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Tax and currency settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Flat sales tax rate applied to the subtotal (0.06 = 6%)
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
    /// Currency code (USD, EUR, ...)
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Currency symbol
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Digits after the decimal point for rounding and display
    #[serde(default = "default_decimals")]
    pub decimals: u32,
    /// Allowed gap between subtotal + tax and total before warning
    #[serde(default = "default_mismatch_tolerance")]
    pub mismatch_tolerance: f64,
}

fn default_tax_rate() -> f64 { 0.06 }
fn default_currency() -> String { "USD".to_string() }
fn default_currency_symbol() -> String { "$".to_string() }
fn default_decimals() -> u32 { 2 }
fn default_mismatch_tolerance() -> f64 { 0.5 }

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: default_tax_rate(),
            currency: default_currency(),
            currency_symbol: default_currency_symbol(),
            decimals: default_decimals(),
            mismatch_tolerance: default_mismatch_tolerance(),
        }
    }
}

/// Storage location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database file; the platform data directory is used when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Menu settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuConfig {
    /// Insert the default menu when the catalog is empty
    #[serde(default = "default_true")]
    pub seed_defaults: bool,
    /// Category given to new items entered without one
    #[serde(default = "default_category")]
    pub default_category: String,
    /// Categories offered by the menu browser, in display order
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
}

fn default_true() -> bool { true }
fn default_category() -> String { "Donuts".to_string() }
fn default_categories() -> Vec<String> {
    vec!["Donuts".to_string(), "Sandwiches".to_string(), "Drinks".to_string()]
}

impl MenuConfig {
    /// Category to store for user input, falling back to the default
    pub fn category_or_default(&self, input: &str) -> String {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            self.default_category.clone()
        } else {
            trimmed.to_string()
        }
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            seed_defaults: true,
            default_category: default_category(),
            categories: default_categories(),
        }
    }
}

/// Line-item option choices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    #[serde(default = "default_icings")]
    pub icings: Vec<String>,
    #[serde(default = "default_fillings")]
    pub fillings: Vec<String>,
}

fn default_icings() -> Vec<String> {
    vec!["Chocolate".to_string(), "Vanilla".to_string(), "Maple".to_string()]
}
fn default_fillings() -> Vec<String> {
    vec!["Custard".to_string(), "Jam".to_string(), "Cream".to_string()]
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            icings: default_icings(),
            fillings: default_fillings(),
        }
    }
}
