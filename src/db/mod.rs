//! Database module for persisting the menu and completed orders
//!
//! Uses SQLite for local storage of:
//! - Menu items (the catalog shown to the cashier)
//! - Orders (one row per completed checkout)
//!
//! `Database` owns the connection; `MenuCatalog` and `OrderLedger` are
//! cheap handles that borrow it for the duration of a call sequence.

mod catalog;
mod ledger;

pub use catalog::{MenuCatalog, MenuFilter, DEFAULT_MENU};
pub use ledger::{OrderLedger, MAX_ITEMS_LEN};

use crate::core::{Config, Error, Result};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Database manager
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at the configured location, or the platform
    /// data directory when none is set
    pub fn new(config: &Config) -> Result<Self> {
        let db_path = match &config.database.path {
            Some(path) => path.clone(),
            None => Self::db_path()?,
        };
        Self::open(&db_path)
    }

    /// Open (or create) a database file
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init_schema()?;

        log::info!("Opened database at {}", path.display());
        Ok(db)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Get the default database file path
    fn db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| Error::Config("Could not determine data directory".to_string()))?;

        Ok(data_dir.join("donut-pos").join("donut-pos.db"))
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            -- Menu catalog; name_key is the lowercased name
            CREATE TABLE IF NOT EXISTS menu_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                name_key TEXT NOT NULL UNIQUE,
                category TEXT,
                price REAL NOT NULL CHECK (price >= 0)
            );

            -- Completed checkouts
            CREATE TABLE IF NOT EXISTS orders (
                transaction_id INTEGER PRIMARY KEY AUTOINCREMENT,
                order_date INTEGER NOT NULL,
                items TEXT NOT NULL CHECK (length(items) <= 4000),
                subtotal REAL NOT NULL,
                tax REAL NOT NULL,
                total REAL NOT NULL
            );
            "#,
        )?;

        Ok(())
    }

    /// Menu catalog backed by this database
    pub fn catalog(&self) -> MenuCatalog<'_> {
        MenuCatalog::new(&self.conn)
    }

    /// Order history backed by this database
    pub fn ledger(&self) -> OrderLedger<'_> {
        OrderLedger::new(&self.conn)
    }
}
