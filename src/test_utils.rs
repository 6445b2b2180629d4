//! Shared test utilities for `CafeLedger`.
//!
//! This module provides common helper functions for setting up test
//! databases and creating test catalog entities with sensible defaults.

use crate::{
    core::{category, material, recipe},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test material with a default price of 1000 per gram.
pub async fn create_test_material(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::material::Model> {
    material::create_material(db, name.to_string(), 1000).await
}

/// Creates a test material with a custom per-gram price.
pub async fn create_custom_material(
    db: &DatabaseConnection,
    name: &str,
    price_per_gram: i64,
) -> Result<entities::material::Model> {
    material::create_material(db, name.to_string(), price_per_gram).await
}

/// Creates a test category.
pub async fn create_test_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::category::Model> {
    category::create_category(db, name.to_string()).await
}

/// Creates a test recipe with no category and no explicit price factor.
pub async fn create_test_recipe(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::recipe::Model> {
    recipe::create_recipe(db, name.to_string(), None, None).await
}

/// Creates a test recipe with custom category and price factor.
/// Use this when you need to test specific recipe configurations.
pub async fn create_custom_recipe(
    db: &DatabaseConnection,
    name: &str,
    category_id: Option<i64>,
    price_factor: Option<f64>,
) -> Result<entities::recipe::Model> {
    recipe::create_recipe(db, name.to_string(), category_id, price_factor).await
}

/// Sets up a complete test environment with one material.
/// Returns (db, material) for common test scenarios.
pub async fn setup_with_material() -> Result<(DatabaseConnection, entities::material::Model)> {
    let db = setup_test_db().await?;
    let material = create_test_material(&db, "Espresso Beans").await?;
    Ok((db, material))
}

/// Sets up a test environment with a fully priced recipe: "Latte" with
/// factor 3.3 composed of 5 g of a 1000-per-gram material, which prices to
/// raw 5000, secondary 16500, final 18150.
pub async fn setup_with_priced_recipe() -> Result<(DatabaseConnection, entities::recipe::Model)> {
    let db = setup_test_db().await?;
    let beans = create_test_material(&db, "Espresso Beans").await?;
    let latte = create_custom_recipe(&db, "Latte", None, Some(3.3)).await?;
    recipe::set_line(&db, latte.id, beans.id, 5).await?;
    Ok((db, latte))
}
