//! Menu catalog: the `menu_items` table

use crate::core::{Error, MenuItem, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Menu inserted by [`MenuCatalog::seed_defaults`] on first run
pub const DEFAULT_MENU: &[(&str, &str, f64)] = &[
    ("Glazed Donut", "Donuts", 1.49),
    ("Chocolate Sprinkle Donut", "Donuts", 1.79),
    ("Boston Creme Donut", "Donuts", 1.99),
    ("Iced Coffee", "Drinks", 2.00),
    ("Latte", "Drinks", 3.00),
    ("Tomato & Mozzarella Sandwich", "Sandwiches", 4.50),
];

/// Category that matches every item in a [`MenuFilter`]
const ALL_CATEGORIES: &str = "All";

/// Case-folded form of a name or category, used for uniqueness and lookups
fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Menu browser filter: category plus a name search
#[derive(Debug, Clone, Default)]
pub struct MenuFilter {
    /// `None` or `"All"` matches every item
    pub category: Option<String>,
    /// Case-insensitive substring of the item name
    pub query: Option<String>,
}

impl MenuFilter {
    pub fn category(category: &str) -> Self {
        Self {
            category: Some(category.to_string()),
            query: None,
        }
    }

    pub fn with_query(mut self, query: &str) -> Self {
        self.query = Some(query.to_string());
        self
    }

    fn matches(&self, item: &MenuItem) -> bool {
        let category_match = match self.category.as_deref() {
            None | Some(ALL_CATEGORIES) => true,
            Some(wanted) => item
                .category
                .as_deref()
                .map_or(false, |c| fold_case(c) == fold_case(wanted)),
        };

        let query_match = match self.query.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(q) => fold_case(&item.name).contains(&fold_case(q)),
        };

        category_match && query_match
    }
}

/// Handle over the menu catalog
pub struct MenuCatalog<'db> {
    conn: &'db Connection,
}

fn menu_item_from_row(row: &Row<'_>) -> rusqlite::Result<MenuItem> {
    Ok(MenuItem {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        price: row.get(3)?,
    })
}

impl<'db> MenuCatalog<'db> {
    pub(crate) fn new(conn: &'db Connection) -> Self {
        Self { conn }
    }

    /// Add a menu item, or update the one that already uses this name
    ///
    /// Names are compared ignoring case. When a match exists its category
    /// and price are overwritten, its stored name is kept, and its id is
    /// returned.
    pub fn add(&self, name: &str, category: Option<&str>, price: f64) -> Result<i64> {
        if let Some(existing) = self.find_by_name(name)? {
            self.conn.execute(
                "UPDATE menu_items SET category = ?1, price = ?2 WHERE id = ?3",
                params![category, price, existing.id],
            )?;
            log::debug!("Upserted menu item {} ({})", existing.id, existing.name);
            return Ok(existing.id);
        }

        self.conn.execute(
            "INSERT INTO menu_items (name, name_key, category, price) VALUES (?1, ?2, ?3, ?4)",
            params![name, fold_case(name), category, price],
        )?;

        let id = self.conn.last_insert_rowid();
        log::debug!("Added menu item {} ({})", id, name);
        Ok(id)
    }

    /// Update an item by id; `Ok(false)` when the id does not exist
    ///
    /// Renaming onto a name held by another item fails with
    /// [`Error::NameConflict`] and leaves the catalog unchanged.
    pub fn update(&self, id: i64, name: &str, category: Option<&str>, price: f64) -> Result<bool> {
        if self.get(id)?.is_none() {
            return Ok(false);
        }

        let clash: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM menu_items WHERE name_key = ?1 AND id <> ?2",
                params![fold_case(name), id],
                |row| row.get(0),
            )
            .optional()?;

        if let Some(other) = clash {
            log::warn!("Rejected rename of menu item {} to '{}': used by item {}", id, name, other);
            return Err(Error::NameConflict(name.to_string()));
        }

        let changed = self.conn.execute(
            "UPDATE menu_items SET name = ?1, name_key = ?2, category = ?3, price = ?4 WHERE id = ?5",
            params![name, fold_case(name), category, price, id],
        )?;

        log::debug!("Updated menu item {}", id);
        Ok(changed > 0)
    }

    /// Delete an item by id; `Ok(false)` when the id does not exist
    pub fn delete(&self, id: i64) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM menu_items WHERE id = ?1", params![id])?;

        log::debug!("Delete menu item {}: {} row(s)", id, deleted);
        Ok(deleted > 0)
    }

    /// All items in insertion order
    pub fn list(&self) -> Result<Vec<MenuItem>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, category, price FROM menu_items ORDER BY id ASC")?;

        let items = stmt
            .query_map([], menu_item_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(items)
    }

    /// Items matching a category and/or name search, in insertion order
    pub fn search(&self, filter: &MenuFilter) -> Result<Vec<MenuItem>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|item| filter.matches(item))
            .collect())
    }

    /// Get a specific item by id
    pub fn get(&self, id: i64) -> Result<Option<MenuItem>> {
        let item = self
            .conn
            .query_row(
                "SELECT id, name, category, price FROM menu_items WHERE id = ?1",
                params![id],
                menu_item_from_row,
            )
            .optional()?;
        Ok(item)
    }

    /// Look an item up by name, ignoring case
    pub fn find_by_name(&self, name: &str) -> Result<Option<MenuItem>> {
        let item = self
            .conn
            .query_row(
                "SELECT id, name, category, price FROM menu_items WHERE name_key = ?1",
                params![fold_case(name)],
                menu_item_from_row,
            )
            .optional()?;
        Ok(item)
    }

    pub fn len(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM menu_items", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Insert [`DEFAULT_MENU`] if the catalog is empty
    ///
    /// Returns the number of items inserted.
    pub fn seed_defaults(&self) -> Result<usize> {
        if !self.is_empty()? {
            return Ok(0);
        }

        for (name, category, price) in DEFAULT_MENU {
            self.add(name, Some(*category), *price)?;
        }

        log::info!("Seeded default menu with {} items", DEFAULT_MENU.len());
        Ok(DEFAULT_MENU.len())
    }
}

#[cfg(test)]
mod tests {
    use crate::core::Error;
    use crate::db::{Database, MenuFilter, DEFAULT_MENU};

    #[test]
    fn test_add_assigns_increasing_ids_from_one() {
        let db = Database::open_in_memory().unwrap();
        let catalog = db.catalog();

        let first = catalog.add("Glazed Donut", Some("Donuts"), 1.49).unwrap();
        let second = catalog.add("Latte", Some("Drinks"), 3.00).unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn test_add_same_name_ignoring_case_updates_in_place() {
        let db = Database::open_in_memory().unwrap();
        let catalog = db.catalog();

        let id = catalog.add("Glazed Donut", Some("Donuts"), 1.49).unwrap();
        let again = catalog.add("GLAZED donut", Some("Specials"), 1.99).unwrap();

        assert_eq!(id, again);
        let items = catalog.list().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Glazed Donut");
        assert_eq!(items[0].category.as_deref(), Some("Specials"));
        assert!((items[0].price - 1.99).abs() < 1e-9);
    }

    #[test]
    fn test_update_missing_id_leaves_catalog_unchanged() {
        let db = Database::open_in_memory().unwrap();
        let catalog = db.catalog();
        catalog.add("Latte", Some("Drinks"), 3.00).unwrap();
        let before = catalog.list().unwrap();

        assert!(!catalog.update(42, "Mocha", Some("Drinks"), 3.50).unwrap());
        assert_eq!(catalog.list().unwrap(), before);
    }

    #[test]
    fn test_update_renames_item() {
        let db = Database::open_in_memory().unwrap();
        let catalog = db.catalog();
        let id = catalog.add("Latte", Some("Drinks"), 3.00).unwrap();

        assert!(catalog.update(id, "Oat Latte", None, 3.25).unwrap());

        assert!(catalog.find_by_name("latte").unwrap().is_none());
        let renamed = catalog.find_by_name("oat latte").unwrap().unwrap();
        assert_eq!(renamed.id, id);
        assert_eq!(renamed.category, None);
        assert!((renamed.price - 3.25).abs() < 1e-9);
    }

    #[test]
    fn test_update_to_own_name_with_new_case_is_allowed() {
        let db = Database::open_in_memory().unwrap();
        let catalog = db.catalog();
        let id = catalog.add("iced coffee", Some("Drinks"), 2.00).unwrap();

        assert!(catalog.update(id, "Iced Coffee", Some("Drinks"), 2.00).unwrap());
        assert_eq!(catalog.get(id).unwrap().unwrap().name, "Iced Coffee");
    }

    #[test]
    fn test_update_rename_collision_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        let catalog = db.catalog();
        catalog.add("Glazed Donut", Some("Donuts"), 1.49).unwrap();
        let latte = catalog.add("Latte", Some("Drinks"), 3.00).unwrap();

        let result = catalog.update(latte, "glazed DONUT", Some("Drinks"), 3.00);
        assert!(matches!(result, Err(Error::NameConflict(_))));

        let unchanged = catalog.get(latte).unwrap().unwrap();
        assert_eq!(unchanged.name, "Latte");
        assert_eq!(catalog.len().unwrap(), 2);
    }

    #[test]
    fn test_add_same_accented_name_updates_in_place() {
        let db = Database::open_in_memory().unwrap();
        let catalog = db.catalog();

        let id = catalog.add("Crème Donut", Some("Donuts"), 2.29).unwrap();
        let again = catalog.add("CRÈME DONUT", Some("Donuts"), 2.49).unwrap();

        assert_eq!(id, again);
        assert_eq!(catalog.len().unwrap(), 1);
        let item = catalog.find_by_name("crème donut").unwrap().unwrap();
        assert_eq!(item.name, "Crème Donut");
        assert!((item.price - 2.49).abs() < 1e-9);
    }

    #[test]
    fn test_update_accented_rename_collision_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        let catalog = db.catalog();
        catalog.add("Éclair", Some("Donuts"), 2.75).unwrap();
        let latte = catalog.add("Latte", Some("Drinks"), 3.00).unwrap();

        let result = catalog.update(latte, "éCLAIR", Some("Drinks"), 3.00);
        assert!(matches!(result, Err(Error::NameConflict(_))));
        assert_eq!(catalog.get(latte).unwrap().unwrap().name, "Latte");
        assert_eq!(catalog.len().unwrap(), 2);
    }

    #[test]
    fn test_search_folds_non_ascii_case() {
        let db = Database::open_in_memory().unwrap();
        let catalog = db.catalog();
        catalog.add("Éclair", Some("Pâtisserie"), 2.75).unwrap();
        catalog.add("Latte", Some("Drinks"), 3.00).unwrap();

        let pastries = catalog.search(&MenuFilter::category("PÂTISSERIE")).unwrap();
        assert_eq!(pastries.len(), 1);
        assert_eq!(pastries[0].name, "Éclair");

        let found = catalog.search(&MenuFilter::default().with_query("ÉCL")).unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_delete() {
        let db = Database::open_in_memory().unwrap();
        let catalog = db.catalog();
        let id = catalog.add("Latte", Some("Drinks"), 3.00).unwrap();

        assert!(catalog.delete(id).unwrap());
        assert!(!catalog.delete(id).unwrap());
        assert!(catalog.is_empty().unwrap());
    }

    #[test]
    fn test_list_after_adds_and_deletes() {
        let db = Database::open_in_memory().unwrap();
        let catalog = db.catalog();

        let mut ids = Vec::new();
        for (name, category, price) in DEFAULT_MENU {
            ids.push(catalog.add(name, Some(*category), *price).unwrap());
        }
        assert!(catalog.delete(ids[1]).unwrap());
        assert!(catalog.delete(ids[4]).unwrap());

        let items = catalog.list().unwrap();
        assert_eq!(items.len(), DEFAULT_MENU.len() - 2);

        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Glazed Donut", "Boston Creme Donut", "Iced Coffee", "Tomato & Mozzarella Sandwich"]
        );
        let sandwich = items.last().unwrap();
        assert_eq!(sandwich.id, ids[5]);
        assert_eq!(sandwich.category.as_deref(), Some("Sandwiches"));
        assert!((sandwich.price - 4.50).abs() < 1e-9);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let db = Database::open_in_memory().unwrap();
        let catalog = db.catalog();
        let first = catalog.add("Latte", Some("Drinks"), 3.00).unwrap();
        catalog.delete(first).unwrap();

        let second = catalog.add("Latte", Some("Drinks"), 3.00).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_negative_price_is_a_storage_fault() {
        let db = Database::open_in_memory().unwrap();
        let catalog = db.catalog();

        let result = catalog.add("Free Refill", Some("Drinks"), -1.0);
        assert!(matches!(result, Err(Error::Database(_))));
        assert!(catalog.is_empty().unwrap());
    }

    #[test]
    fn test_seed_defaults_only_when_empty() {
        let db = Database::open_in_memory().unwrap();
        let catalog = db.catalog();

        assert_eq!(catalog.seed_defaults().unwrap(), DEFAULT_MENU.len());
        assert_eq!(catalog.seed_defaults().unwrap(), 0);
        assert_eq!(catalog.len().unwrap(), DEFAULT_MENU.len());
    }

    #[test]
    fn test_search_by_category_and_query() {
        let db = Database::open_in_memory().unwrap();
        let catalog = db.catalog();
        catalog.seed_defaults().unwrap();
        catalog.add("Day-old Bag", None, 2.00).unwrap();

        let all = catalog.search(&MenuFilter::default()).unwrap();
        assert_eq!(all.len(), DEFAULT_MENU.len() + 1);

        let everything = catalog.search(&MenuFilter::category("All")).unwrap();
        assert_eq!(everything.len(), all.len());

        let drinks = catalog.search(&MenuFilter::category("drinks")).unwrap();
        let names: Vec<&str> = drinks.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Iced Coffee", "Latte"]);

        let donuts = catalog
            .search(&MenuFilter::category("Donuts").with_query("CHOC"))
            .unwrap();
        assert_eq!(donuts.len(), 1);
        assert_eq!(donuts[0].name, "Chocolate Sprinkle Donut");

        let bags = catalog.search(&MenuFilter::default().with_query("bag")).unwrap();
        assert_eq!(bags.len(), 1);
        assert!(catalog
            .search(&MenuFilter::category("Donuts").with_query("bag"))
            .unwrap()
            .is_empty());
    }
}
