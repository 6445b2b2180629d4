//! Recipe business logic - Handles all recipe-related operations.
//!
//! A recipe is a named composition of material lines plus an optional markup
//! factor. Lines are keyed by material: `set_line` updates the quantity when
//! the recipe already uses that material and inserts a new line otherwise,
//! so a recipe never references the same material twice. Deleting a recipe
//! removes its lines in the same database transaction; historical order
//! items are unaffected because they carry their own price snapshots.

use crate::{
    entities::{Category, Material, Recipe, RecipeLine, recipe, recipe_line},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Retrieves all recipes, ordered alphabetically by name.
pub async fn get_all_recipes(db: &DatabaseConnection) -> Result<Vec<recipe::Model>> {
    Recipe::find()
        .order_by_asc(recipe::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a recipe by its name, returning None if not found.
pub async fn get_recipe_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<recipe::Model>> {
    Recipe::find()
        .filter(recipe::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a recipe by its unique ID.
pub async fn get_recipe_by_id(
    db: &DatabaseConnection,
    recipe_id: i64,
) -> Result<Option<recipe::Model>> {
    Recipe::find_by_id(recipe_id)
        .one(db)
        .await
        .map_err(Into::into)
}

async fn validate_category<C>(db: &C, category_id: Option<i64>) -> Result<()>
where
    C: ConnectionTrait,
{
    if let Some(id) = category_id
        && Category::find_by_id(id).one(db).await?.is_none()
    {
        return Err(Error::CategoryNotFound {
            name: id.to_string(),
        });
    }
    Ok(())
}

fn validate_factor(price_factor: Option<f64>) -> Result<()> {
    // Non-positive factors are stored as given and fall back to the default
    // at computation time; only non-finite values are rejected outright.
    if let Some(factor) = price_factor
        && !factor.is_finite()
    {
        return Err(Error::Config {
            message: "Price factor must be a finite number".to_string(),
        });
    }
    Ok(())
}

/// Creates a new recipe with an optional category and markup factor.
///
/// The name must be non-empty after trimming and unique across recipes. The
/// factor may be omitted; pricing falls back to the default markup when it
/// is missing or non-positive.
pub async fn create_recipe(
    db: &DatabaseConnection,
    name: String,
    category_id: Option<i64>,
    price_factor: Option<f64>,
) -> Result<recipe::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Recipe name cannot be empty".to_string(),
        });
    }
    validate_factor(price_factor)?;

    let name = name.trim().to_string();
    if get_recipe_by_name(db, &name).await?.is_some() {
        return Err(Error::DuplicateName { name });
    }
    validate_category(db, category_id).await?;

    let now = chrono::Utc::now().naive_utc();
    let recipe = recipe::ActiveModel {
        name: Set(name),
        category_id: Set(category_id),
        price_factor: Set(price_factor),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    recipe.insert(db).await.map_err(Into::into)
}

/// Updates a recipe's name, category, and markup factor.
pub async fn update_recipe(
    db: &DatabaseConnection,
    recipe_id: i64,
    new_name: String,
    category_id: Option<i64>,
    price_factor: Option<f64>,
) -> Result<recipe::Model> {
    if new_name.trim().is_empty() {
        return Err(Error::Config {
            message: "Recipe name cannot be empty".to_string(),
        });
    }
    validate_factor(price_factor)?;

    let new_name = new_name.trim().to_string();
    if let Some(existing) = get_recipe_by_name(db, &new_name).await?
        && existing.id != recipe_id
    {
        return Err(Error::DuplicateName { name: new_name });
    }
    validate_category(db, category_id).await?;

    let mut recipe: recipe::ActiveModel = Recipe::find_by_id(recipe_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::RecipeNotFound {
            name: recipe_id.to_string(),
        })?
        .into();

    recipe.name = Set(new_name);
    recipe.category_id = Set(category_id);
    recipe.price_factor = Set(price_factor);
    recipe.updated_at = Set(chrono::Utc::now().naive_utc());

    recipe.update(db).await.map_err(Into::into)
}

/// Lists a recipe's material lines.
pub async fn list_recipe_lines<C>(db: &C, recipe_id: i64) -> Result<Vec<recipe_line::Model>>
where
    C: ConnectionTrait,
{
    RecipeLine::find()
        .filter(recipe_line::Column::RecipeId.eq(recipe_id))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sets the quantity of a material within a recipe.
///
/// Lines are keyed by material: when the recipe already uses the material
/// the existing line's quantity is replaced, otherwise a new line is
/// inserted. The quantity must be a positive number of grams.
pub async fn set_line(
    db: &DatabaseConnection,
    recipe_id: i64,
    material_id: i64,
    grams: i64,
) -> Result<recipe_line::Model> {
    if grams <= 0 {
        return Err(Error::InvalidAmount { amount: grams });
    }

    Recipe::find_by_id(recipe_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::RecipeNotFound {
            name: recipe_id.to_string(),
        })?;

    Material::find_by_id(material_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::MaterialNotFound {
            name: material_id.to_string(),
        })?;

    let existing = RecipeLine::find()
        .filter(recipe_line::Column::RecipeId.eq(recipe_id))
        .filter(recipe_line::Column::MaterialId.eq(material_id))
        .one(db)
        .await?;

    if let Some(line) = existing {
        let mut line: recipe_line::ActiveModel = line.into();
        line.grams = Set(grams);
        line.update(db).await.map_err(Into::into)
    } else {
        let line = recipe_line::ActiveModel {
            recipe_id: Set(recipe_id),
            material_id: Set(material_id),
            grams: Set(grams),
            ..Default::default()
        };
        line.insert(db).await.map_err(Into::into)
    }
}

/// Removes a material line from a recipe. Removing a line that does not
/// exist is a no-op.
pub async fn remove_line(db: &DatabaseConnection, recipe_id: i64, material_id: i64) -> Result<()> {
    RecipeLine::delete_many()
        .filter(recipe_line::Column::RecipeId.eq(recipe_id))
        .filter(recipe_line::Column::MaterialId.eq(material_id))
        .exec(db)
        .await?;
    Ok(())
}

/// Deletes a recipe and all of its material lines atomically.
///
/// Always permitted: nothing downstream references a recipe except
/// historical order items, which keep their own name and price snapshots.
pub async fn delete_recipe(db: &DatabaseConnection, recipe_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let recipe = Recipe::find_by_id(recipe_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::RecipeNotFound {
            name: recipe_id.to_string(),
        })?;

    RecipeLine::delete_many()
        .filter(recipe_line::Column::RecipeId.eq(recipe_id))
        .exec(&txn)
        .await?;
    recipe.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}
