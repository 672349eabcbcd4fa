//! Donut POS - Demo CLI
//!
//! Walks through a shift at the till: seeds the menu, browses it, rings up
//! an order, checks out, and edits the order history the way the admin
//! screens would.

use anyhow::Context;

use donut_pos_lib::core::Config;
use donut_pos_lib::db::{Database, MenuFilter};
use donut_pos_lib::order::{LineOptions, OrderBuilder};
use donut_pos_lib::pricing::PricingEngine;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("==============================================");
    println!("   Donut POS - Demo CLI");
    println!("==============================================\n");

    // 1. Configuration
    println!("[1/5] Loading configuration...");
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            println!("      Could not load config: {}", e);
            println!("      Using defaults...");
            Config::default()
        }
    };
    let pricing = PricingEngine::new(&config.pricing);
    println!("      Currency: {} ({})", config.pricing.currency, pricing.currency_symbol());
    println!("      {}\n", pricing.tax_label());

    // 2. Database
    println!("[2/5] Opening database...");
    let db = match Database::new(&config) {
        Ok(d) => d,
        Err(e) => {
            println!("      Warning: Could not open database: {}", e);
            println!("      Continuing with an in-memory database...");
            Database::open_in_memory().context("opening in-memory database")?
        }
    };
    let catalog = db.catalog();
    let ledger = db.ledger();

    if config.menu.seed_defaults {
        let seeded = catalog.seed_defaults().context("seeding default menu")?;
        if seeded > 0 {
            println!("      Seeded {} default menu items", seeded);
        }
    }

    // Admin screen: a new item entered with the category field left blank
    let category = config.menu.category_or_default("");
    let maple_bar = catalog
        .add("Maple Bar", Some(&category), 2.25)
        .context("adding menu item")?;
    println!("      Menu item {} saved under {}", maple_bar, category);
    println!();

    // 3. Menu
    println!("[3/5] Menu");
    for category in &config.menu.categories {
        let items = catalog.search(&MenuFilter::category(category))?;
        if items.is_empty() {
            continue;
        }
        println!("      {}:", category);
        for item in items {
            println!("        {:>3}: {:<32} {:>8}", item.id, item.name, pricing.format(item.price));
        }
    }
    println!();

    // 4. Ring up and check out an order
    println!("[4/5] Ringing up an order...");
    let mut order = OrderBuilder::new();
    let icing = config.options.icings.first().map(String::as_str);
    let filling = config.options.fillings.first().map(String::as_str);

    let donut = order.add_from_catalog(&catalog, "Glazed Donut", 2, LineOptions::new(icing, None))?;
    order.add_from_catalog(&catalog, "Boston Creme Donut", 1, LineOptions::new(None, filling))?;
    order.add_from_catalog(&catalog, "Latte", 1, LineOptions::default())?;
    order.set_quantity(donut, 3)?;

    println!("----------------------------------------------");
    for line in order.lines() {
        println!(
            "  {:<24} {:<22} x{:<3} {:>8}",
            line.item_name,
            line.options.description(),
            line.quantity,
            pricing.format(line.line_total())
        );
    }
    let totals = order.totals(&pricing);
    println!("----------------------------------------------");
    println!("  Subtotal: {}", pricing.format(totals.subtotal));
    println!("  {}: {}", pricing.tax_label(), pricing.format(totals.tax));
    println!("  Total:    {}", pricing.format(totals.total));

    let receipt = order.checkout(&ledger, &pricing).context("checkout failed")?;
    println!(
        "\n  Checkout complete! Transaction ID: {}  Amount: {}\n",
        receipt.transaction_id,
        pricing.format(receipt.totals.total)
    );

    // 5. Order history
    println!("[5/5] Order history");
    let typed_total = pricing.format(receipt.totals.total + 1.0);
    let edited_total = pricing.parse_amount(&typed_total)?;
    if let Some(warning) = pricing.check_totals(receipt.totals.subtotal, receipt.totals.tax, edited_total) {
        println!(
            "      Edit warning: total {} but subtotal + tax is {}",
            pricing.format(warning.entered_total),
            pricing.format(warning.expected_total)
        );
    }
    let summary = format!("{} (comped coffee)", receipt.items);
    if ledger.update(receipt.transaction_id, &summary, receipt.totals.subtotal, receipt.totals.tax, receipt.totals.total)? {
        println!("      Order {} updated", receipt.transaction_id);
    }

    for stored in ledger.list()?.iter().take(5) {
        let date = stored
            .order_datetime()
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "      #{:<5} {}  {:>8}  {}",
            stored.transaction_id,
            date,
            pricing.format(stored.total),
            stored.items
        );
    }

    println!("\n==============================================\n");
    Ok(())
}
