//! Category business logic - grouping labels for recipes.
//!
//! Categories carry no behavior of their own; they exist so price listings
//! and menus can group recipes.

use crate::{
    entities::{Category, category},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Retrieves all categories, ordered alphabetically by name.
pub async fn get_all_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a category by its name, returning None if not found.
pub async fn get_category_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<category::Model>> {
    Category::find()
        .filter(category::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a category by its unique ID.
pub async fn get_category_by_id(
    db: &DatabaseConnection,
    category_id: i64,
) -> Result<Option<category::Model>> {
    Category::find_by_id(category_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new category with a non-empty, unique name.
pub async fn create_category(db: &DatabaseConnection, name: String) -> Result<category::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Category name cannot be empty".to_string(),
        });
    }

    let name = name.trim().to_string();
    if get_category_by_name(db, &name).await?.is_some() {
        return Err(Error::DuplicateName { name });
    }

    let category = category::ActiveModel {
        name: Set(name),
        ..Default::default()
    };
    category.insert(db).await.map_err(Into::into)
}
