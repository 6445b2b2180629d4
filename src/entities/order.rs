//! Order entity - A finalized sale transaction.
//!
//! Orders are immutable once saved except for the status field. The receipt
//! number is derived from the placement timestamp and is unique across the
//! ledger.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique receipt number, derived from the placement timestamp
    pub receipt_number: String,
    /// When the order was placed
    pub placed_at: DateTimeUtc,
    /// Sum of all item line totals in whole currency units
    pub total: i64,
    /// Order status: `"completed"`, `"pending"`, or `"cancelled"`
    pub status: String,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One order has many order items
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
