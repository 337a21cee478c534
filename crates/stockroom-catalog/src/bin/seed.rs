//! # Seed Data Generator
//!
//! Populates the catalog with sample products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 100 products (default) into $STOCKROOM_DB_PATH or ./stockroom.db
//! cargo run -p stockroom-catalog --bin seed
//!
//! # Generate custom amount
//! cargo run -p stockroom-catalog --bin seed -- --count 500
//!
//! # Specify database path
//! cargo run -p stockroom-catalog --bin seed -- --db ./data/stockroom.db
//! ```
//!
//! ## Generated Products
//! Every product goes through `ProductCatalog::create`, so the normal rules
//! apply. Codes are deterministic (`{PREFIX}-{NNNN}`), which makes re-running
//! the seed safe: codes already stored are skipped.
//!
//! Each product has:
//! - Code: `ELE-0001`, `ACC-0002`, ...
//! - Name: base item plus a variant
//! - Price: $4.99 - $249.99
//! - Stock: 0 - 120

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use stockroom_catalog::{CatalogConfig, CatalogError, ProductCatalog};
use stockroom_core::{Category, Money, ProductDraft};
use tracing::info;

const DEFAULT_COUNT: usize = 100;

/// Base items per category, with a code prefix.
const ITEMS: &[(Category, &str, &[&str])] = &[
    (
        Category::Electronics,
        "ELE",
        &[
            "Bluetooth Speaker",
            "USB-C Charger",
            "Noise Cancelling Headphones",
            "Smart Watch",
            "Portable SSD",
            "Webcam",
            "Wireless Earbuds",
            "E-Reader",
        ],
    ),
    (
        Category::Accessories,
        "ACC",
        &[
            "Wireless Mouse",
            "Mechanical Keyboard",
            "Laptop Sleeve",
            "Phone Case",
            "HDMI Cable",
            "Mouse Pad",
            "Screen Protector",
            "Travel Adapter",
        ],
    ),
    (
        Category::Furniture,
        "FUR",
        &[
            "Standing Desk",
            "Office Chair",
            "Bookshelf",
            "Filing Cabinet",
            "Monitor Stand",
            "Footrest",
            "Desk Lamp",
            "Side Table",
        ],
    ),
    (
        Category::Clothing,
        "CLO",
        &[
            "Cotton T-Shirt",
            "Hooded Sweatshirt",
            "Denim Jacket",
            "Rain Coat",
            "Wool Socks",
            "Baseball Cap",
            "Running Shorts",
            "Fleece Vest",
        ],
    ),
];

/// Variants appended to item names
const VARIANTS: &[&str] = &["Black", "White", "Grey", "Blue", "Pro", "Mini", "XL", "Lite"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    stockroom_catalog::init_tracing();

    let mut config = CatalogConfig::from_env()?;
    let mut count = DEFAULT_COUNT;

    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(DEFAULT_COUNT);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.database_path = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Stockroom Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: {DEFAULT_COUNT})");
                println!("  -d, --db <PATH>    Database file path (default: $STOCKROOM_DB_PATH or ./stockroom.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Stockroom Seed Data Generator");
    println!("=============================");
    println!("Database: {}", config.database_path.display());
    println!("Products: {}", count);
    println!();

    let catalog = ProductCatalog::open(&config).await?;
    println!("✓ Connected to database");

    let start = Instant::now();
    let mut created = 0;
    let mut skipped = 0;

    for seq in 0..count {
        let draft = sample_draft(seq);

        match catalog.create(&draft).await {
            Ok(_) => created += 1,
            Err(CatalogError::DuplicateCode { .. }) => skipped += 1,
            Err(e) => {
                eprintln!("Failed to create {:?}: {}", draft.code, e);
                continue;
            }
        }

        if (seq + 1) % 50 == 0 {
            println!("  Processed {} products...", seq + 1);
        }
    }

    let elapsed = start.elapsed();
    info!(created, skipped, ?elapsed, "Seed finished");

    println!();
    println!("✓ Created {} products in {:?}", created, elapsed);
    if skipped > 0 {
        println!("  Skipped {} codes that already existed", skipped);
    }
    println!("  Catalog now holds {} products", catalog.count().await?);

    catalog.database().close().await;
    Ok(())
}

/// Builds the `seq`-th sample product. Same `seq`, same product.
fn sample_draft(seq: usize) -> ProductDraft {
    let (category, prefix, items) = ITEMS[seq % ITEMS.len()];
    let round = seq / ITEMS.len();
    let item = items[round % items.len()];
    let variant = VARIANTS[(round / items.len()) % VARIANTS.len()];

    // $4.99 - $249.99
    let price_cents = 499 + ((seq * 7919) % 24_501) as i64;
    let stock = ((seq * 37) % 121) as i64;

    ProductDraft {
        code: Some(format!("{}-{:04}", prefix, seq + 1)),
        name: Some(format!("{} {}", item, variant)),
        category: Some(category.as_str().to_string()),
        price: Some(Money::from_cents(price_cents)),
        stock: Some(stock),
        active: Some(seq % 10 != 9),
    }
}
