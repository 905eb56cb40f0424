//! # Seed Data Generator
//!
//! Populates the database with a demo catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./sweetify.db
//! cargo run -p sweetify-db --bin seed
//!
//! # Specify database path
//! cargo run -p sweetify-db --bin seed -- --db ./data/sweetify.db
//! ```
//!
//! Skips seeding when the catalog already has sweets.

use std::env;
use sweetify_core::validation::validate_new_sweet;
use sweetify_core::NewSweet;
use sweetify_db::{Database, DbConfig};

/// (name, category, price in cents, stock, image)
const CATALOG: &[(&str, &str, i64, i64, &str)] = &[
    ("Dark Chocolate Truffle", "Chocolate", 899, 40, "https://images.unsplash.com/photo-1548907040-4baa42d10919"),
    ("Milk Chocolate Bar", "Chocolate", 349, 120, "https://images.unsplash.com/photo-1623660053975-cf75a8be0908"),
    ("Hazelnut Praline", "Chocolate", 599, 35, "https://images.unsplash.com/photo-1606312619070-d48b4c652a52"),
    ("Caramel Log", "Candy", 499, 60, "https://images.unsplash.com/photo-1582058091505-f87a2e55a40f"),
    ("Strawberry Lollipop", "Candy", 149, 200, "https://images.unsplash.com/photo-1575224300306-1b8da36134ec"),
    ("Sour Gummy Worms", "Gummies", 299, 150, "https://images.unsplash.com/photo-1582058091505-f87a2e55a40f"),
    ("Gummy Bears", "Gummies", 249, 180, "https://images.unsplash.com/photo-1581798459219-318e76aecc7b"),
    ("Vanilla Fudge", "Fudge", 649, 25, "https://images.unsplash.com/photo-1541783245831-57d6fb0926d3"),
    ("Pistachio Baklava", "Pastry", 799, 30, "https://images.unsplash.com/photo-1598110750624-207050c4f28c"),
    ("Rose Turkish Delight", "Confection", 699, 45, "https://images.unsplash.com/photo-1576618148400-f54bed99fcfd"),
    ("Peppermint Humbugs", "Candy", 199, 0, "https://images.unsplash.com/photo-1514517604298-cf80e0fb7f1e"),
    ("Salted Caramel Macaron", "Pastry", 299, 60, "https://images.unsplash.com/photo-1569864358642-9d1684040f43"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = env::var("DATABASE_PATH").unwrap_or_else(|_| String::from("./sweetify.db"));

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Sweetify Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: $DATABASE_PATH or ./sweetify.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🍬 Sweetify Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.sweets().count().await?;
    if existing > 0 {
        println!("⚠ Catalog already has {} sweets", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    let mut inserted = 0;
    for (name, category, price_cents, quantity, image_url) in CATALOG {
        let sweet = NewSweet {
            name: name.to_string(),
            category: category.to_string(),
            price_cents: *price_cents,
            quantity: *quantity,
            image_url: Some(image_url.to_string()),
        };

        if let Err(e) = validate_new_sweet(&sweet) {
            eprintln!("Skipping {}: {}", name, e);
            continue;
        }

        if let Err(e) = db.sweets().insert(&sweet).await {
            eprintln!("Failed to insert {}: {}", name, e);
            continue;
        }

        inserted += 1;
    }

    println!("✓ Inserted {} sweets", inserted);

    db.close().await;
    Ok(())
}
