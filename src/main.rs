//! `CafeLedger` binary entry point: initializes the database, seeds the
//! catalog from config.toml when present, and logs the current price list.

use cafe_ledger::{
    config,
    core::{pricing, report},
    errors::Result,
};
use dotenvy::dotenv;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Initialize database
    let db = config::database::create_connection().await?;
    config::database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    // 4. Seed initial catalog if a config.toml is present
    if Path::new("config.toml").exists() {
        let catalog = config::catalog::load_default_config()?;
        config::catalog::seed_initial_catalog(&db, &catalog).await?;
    } else {
        info!("No config.toml found, skipping catalog seeding.");
    }

    // 5. Log the current price list
    let prices = pricing::compute_all_prices(&db).await?;
    if prices.is_empty() {
        info!("No priced recipes in the catalog yet.");
    } else {
        info!("Current price list ({} recipes):", prices.len());
        for entry in &prices {
            info!("  {}", report::format_price_line(entry));
        }
    }

    Ok(())
}
