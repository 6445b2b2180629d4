//! Recipe entity - A menu item defined as a composition of materials.
//!
//! A recipe belongs to at most one category and carries an optional markup
//! factor. A missing or non-positive factor falls back to the default at
//! price-computation time, so `price_factor` stays `None` when never set.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Recipe database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    /// Unique identifier for the recipe
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique name of the recipe (e.g., "Latte")
    pub name: String,
    /// Category this recipe belongs to, if any
    pub category_id: Option<i64>,
    /// Markup multiplier applied to raw material cost; None means "unset"
    pub price_factor: Option<f64>,
    /// When the recipe was created
    pub created_at: DateTime,
    /// When the recipe was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Recipe and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each recipe belongs to at most one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    /// One recipe is composed of many recipe lines
    #[sea_orm(has_many = "super::recipe_line::Entity")]
    RecipeLines,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::recipe_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecipeLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
