//! Material entity - Represents a priced raw ingredient.
//!
//! Each material has a unique name and a price per gram in whole currency
//! units. Materials are referenced by recipe lines and cannot be deleted
//! while any recipe still uses them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Material database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    /// Unique identifier for the material
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name of the material (e.g., "Espresso Beans")
    pub name: String,
    /// Price per gram in whole currency units
    pub price_per_gram: i64,
    /// When the material was created
    pub created_at: DateTime,
    /// When the material was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Material and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One material appears in many recipe lines
    #[sea_orm(has_many = "super::recipe_line::Entity")]
    RecipeLines,
}

impl Related<super::recipe_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecipeLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
