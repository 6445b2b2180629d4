//! Recipe line entity - One (material, quantity) pairing within a recipe.
//!
//! A recipe references a given material at most once; the line quantity is
//! a positive number of grams. Uniqueness of (recipe, material) is enforced
//! at the mutation boundary by `core::recipe::set_line`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Recipe line database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipe_lines")]
pub struct Model {
    /// Unique identifier for the line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the recipe this line belongs to
    pub recipe_id: i64,
    /// ID of the material this line consumes
    pub material_id: i64,
    /// Quantity of the material in grams
    pub grams: i64,
}

/// Defines relationships between `RecipeLine` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one recipe
    #[sea_orm(
        belongs_to = "super::recipe::Entity",
        from = "Column::RecipeId",
        to = "super::recipe::Column::Id"
    )]
    Recipe,
    /// Each line consumes one material
    #[sea_orm(
        belongs_to = "super::material::Entity",
        from = "Column::MaterialId",
        to = "super::material::Column::Id"
    )]
    Material,
}

impl Related<super::recipe::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipe.def()
    }
}

impl Related<super::material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Material.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
