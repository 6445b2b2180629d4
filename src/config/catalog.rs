//! Initial catalog loading from config.toml.
//!
//! This module provides functionality to load seed categories and materials
//! from a TOML configuration file. The entries defined in config.toml are
//! inserted on startup when they are not already present, so re-running the
//! application never duplicates or overwrites catalog state.

use crate::{
    core::{category, material},
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// Category names to seed
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
    /// Materials to seed
    #[serde(default)]
    pub materials: Vec<MaterialConfig>,
}

/// Configuration for a single category
#[derive(Debug, Deserialize, Clone)]
pub struct CategoryConfig {
    /// Name of the category
    pub name: String,
}

/// Configuration for a single material
#[derive(Debug, Deserialize, Clone)]
pub struct MaterialConfig {
    /// Name of the material
    pub name: String,
    /// Price per gram in whole currency units
    pub price_per_gram: i64,
}

/// Loads catalog configuration from a TOML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads catalog configuration from the default location (./config.toml).
pub fn load_default_config() -> Result<CatalogConfig> {
    load_config("config.toml")
}

/// Seeds the catalog with the configured categories and materials, skipping
/// any entry whose name already exists.
pub async fn seed_initial_catalog(
    db: &DatabaseConnection,
    config: &CatalogConfig,
) -> Result<()> {
    let mut seeded = 0usize;

    for entry in &config.categories {
        if category::get_category_by_name(db, entry.name.trim())
            .await?
            .is_none()
        {
            category::create_category(db, entry.name.clone()).await?;
            seeded += 1;
        }
    }

    for entry in &config.materials {
        if material::get_material_by_name(db, entry.name.trim())
            .await?
            .is_none()
        {
            material::create_material(db, entry.name.clone(), entry.price_per_gram).await?;
            seeded += 1;
        }
    }

    info!(
        "Catalog seeding complete: {seeded} new entries, {} configured",
        config.categories.len() + config.materials.len()
    );
    Ok(())
}
