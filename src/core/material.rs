//! Material business logic - Handles all material-related operations.
//!
//! Provides functions for creating, retrieving, updating, and deleting the
//! priced raw ingredients that recipes are composed of. Deletion is guarded:
//! a material that is still referenced by any recipe line cannot be removed,
//! and the caller receives the list of blocking recipes.

use crate::{
    entities::{Material, Recipe, RecipeLine, material, recipe, recipe_line},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Retrieves all materials from the database, ordered alphabetically by name.
pub async fn get_all_materials(db: &DatabaseConnection) -> Result<Vec<material::Model>> {
    Material::find()
        .order_by_asc(material::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a specific material by its name, returning None if not found.
pub async fn get_material_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<material::Model>> {
    Material::find()
        .filter(material::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a material by its unique ID, used for direct lookups.
pub async fn get_material_by_id(
    db: &DatabaseConnection,
    material_id: i64,
) -> Result<Option<material::Model>> {
    Material::find_by_id(material_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new material with the specified name and per-gram price.
///
/// The name must be non-empty after trimming and unique across materials;
/// the price must be a positive integer. Rejections happen here, before any
/// write reaches the store.
pub async fn create_material(
    db: &DatabaseConnection,
    name: String,
    price_per_gram: i64,
) -> Result<material::Model> {
    // Validate inputs
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Material name cannot be empty".to_string(),
        });
    }

    if price_per_gram <= 0 {
        return Err(Error::InvalidAmount {
            amount: price_per_gram,
        });
    }

    let name = name.trim().to_string();
    if get_material_by_name(db, &name).await?.is_some() {
        return Err(Error::DuplicateName { name });
    }

    let now = chrono::Utc::now().naive_utc();
    let material = material::ActiveModel {
        name: Set(name),
        price_per_gram: Set(price_per_gram),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    material.insert(db).await.map_err(Into::into)
}

/// Updates an existing material's name and per-gram price.
///
/// Applies the same validation as [`create_material`]; renaming onto another
/// material's name is rejected. Recipes referencing the material pick up the
/// new price on their next price computation; historical order items do not.
pub async fn update_material(
    db: &DatabaseConnection,
    material_id: i64,
    new_name: String,
    new_price: i64,
) -> Result<material::Model> {
    if new_name.trim().is_empty() {
        return Err(Error::Config {
            message: "Material name cannot be empty".to_string(),
        });
    }

    if new_price <= 0 {
        return Err(Error::InvalidAmount { amount: new_price });
    }

    let new_name = new_name.trim().to_string();
    if let Some(existing) = get_material_by_name(db, &new_name).await?
        && existing.id != material_id
    {
        return Err(Error::DuplicateName { name: new_name });
    }

    let mut material: material::ActiveModel = Material::find_by_id(material_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::MaterialNotFound {
            name: material_id.to_string(),
        })?
        .into();

    material.name = Set(new_name);
    material.price_per_gram = Set(new_price);
    material.updated_at = Set(chrono::Utc::now().naive_utc());

    material.update(db).await.map_err(Into::into)
}

/// Returns the names of all recipes that reference the given material,
/// ordered alphabetically. An empty result means the material is safe to
/// delete.
pub async fn recipes_using_material<C>(db: &C, material_id: i64) -> Result<Vec<String>>
where
    C: ConnectionTrait,
{
    let lines = RecipeLine::find()
        .filter(recipe_line::Column::MaterialId.eq(material_id))
        .all(db)
        .await?;

    if lines.is_empty() {
        return Ok(Vec::new());
    }

    let recipe_ids: Vec<i64> = lines.iter().map(|line| line.recipe_id).collect();
    let recipes = Recipe::find()
        .filter(recipe::Column::Id.is_in(recipe_ids))
        .order_by_asc(recipe::Column::Name)
        .all(db)
        .await?;

    Ok(recipes.into_iter().map(|r| r.name).collect())
}

/// Deletes a material, refusing while any recipe line still references it.
///
/// The referential-integrity check runs before the delete so the constraint
/// never reaches the storage layer; the error carries the blocking recipe
/// names for the caller to surface.
pub async fn delete_material(db: &DatabaseConnection, material_id: i64) -> Result<()> {
    let material = Material::find_by_id(material_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::MaterialNotFound {
            name: material_id.to_string(),
        })?;

    let blocking = recipes_using_material(db, material_id).await?;
    if !blocking.is_empty() {
        return Err(Error::MaterialInUse {
            name: material.name,
            recipes: blocking,
        });
    }

    material.delete(db).await?;
    Ok(())
}
