//! Order item entity - One recipe-and-quantity line within an order.
//!
//! The unit price is a snapshot of the computed final price at the moment of
//! sale and is never recomputed from current catalog state. The recipe name
//! is also captured so the line stays displayable after the recipe itself is
//! deleted; `recipe_id` is retained for display lookup only and is not a
//! foreign key constraint.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    /// Unique identifier for the order item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the order this item belongs to
    pub order_id: i64,
    /// ID of the recipe that was sold (display reference, recipe may be gone)
    pub recipe_id: i64,
    /// Name of the recipe at the moment of sale
    pub recipe_name: String,
    /// Final price per unit at the moment of sale
    pub unit_price: i64,
    /// Number of units sold
    pub quantity: i64,
    /// `unit_price` × `quantity`
    pub line_total: i64,
}

/// Defines relationships between `OrderItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each item belongs to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
