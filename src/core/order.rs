//! Order ledger - append-only record of placed orders.
//!
//! `place_order` converts an in-memory draft into a persisted order inside
//! a single database transaction: every line's unit price is resolved from
//! current catalog state via the price calculator, the receipt number is
//! generated, and the header plus all items are inserted together. On any
//! failure nothing is persisted. Once saved, an order's prices are
//! snapshots; later catalog edits never change them.

use crate::{
    core::{draft::OrderDraft, pricing},
    entities::{Order, OrderItem, Recipe, order, order_item},
    errors::{Error, Result},
};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Status written on orders placed through [`place_order`]
pub const STATUS_COMPLETED: &str = "completed";

/// A persisted order header together with its items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    /// The order header
    pub order: order::Model,
    /// The order's line items
    pub items: Vec<order_item::Model>,
}

/// Places an order: resolves current prices, generates a receipt number,
/// and persists the header and all line items atomically.
///
/// A recipe with no material lines has no price and aborts the whole order;
/// partial orders are never recorded.
pub async fn place_order(db: &DatabaseConnection, draft: &OrderDraft) -> Result<PlacedOrder> {
    if draft.is_empty() {
        return Err(Error::Config {
            message: "Cannot place an empty order".to_string(),
        });
    }

    // Use a transaction to ensure atomicity
    let txn = db.begin().await?;

    let mut resolved = Vec::with_capacity(draft.lines().len());
    let mut total = 0i64;
    for line in draft.lines() {
        let recipe = Recipe::find_by_id(line.recipe_id)
            .one(&txn)
            .await?
            .ok_or_else(|| Error::RecipeNotFound {
                name: line.recipe_id.to_string(),
            })?;

        let quote = pricing::quote_recipe(&txn, &recipe)
            .await?
            .ok_or_else(|| Error::EmptyRecipe {
                name: recipe.name.clone(),
            })?;

        let line_total = quote.final_price * line.quantity;
        total += line_total;
        resolved.push((recipe, line.quantity, quote.final_price, line_total));
    }

    let placed_at = Utc::now();
    let receipt_number = next_receipt_number(&txn, placed_at).await?;

    let order_model = order::ActiveModel {
        receipt_number: Set(receipt_number),
        placed_at: Set(placed_at),
        total: Set(total),
        status: Set(STATUS_COMPLETED.to_string()),
        ..Default::default()
    };
    let saved_order = order_model.insert(&txn).await?;

    let mut items = Vec::with_capacity(resolved.len());
    for (recipe, quantity, unit_price, line_total) in resolved {
        let item = order_item::ActiveModel {
            order_id: Set(saved_order.id),
            recipe_id: Set(recipe.id),
            recipe_name: Set(recipe.name),
            unit_price: Set(unit_price),
            quantity: Set(quantity),
            line_total: Set(line_total),
            ..Default::default()
        };
        items.push(item.insert(&txn).await?);
    }

    // Commit the transaction
    txn.commit().await?;

    Ok(PlacedOrder {
        order: saved_order,
        items,
    })
}

/// Derives the next free receipt number from the placement timestamp.
///
/// The base format is `YYYYMMDD-HHMMSS`; two orders landing in the same
/// second get a `-2`, `-3`, ... suffix so receipt numbers stay unique
/// without changing the timestamp-derived contract.
async fn next_receipt_number<C>(db: &C, placed_at: DateTime<Utc>) -> Result<String>
where
    C: ConnectionTrait,
{
    let base = placed_at.format("%Y%m%d-%H%M%S").to_string();

    let mut candidate = base.clone();
    let mut suffix = 2u32;
    while Order::find()
        .filter(order::Column::ReceiptNumber.eq(candidate.as_str()))
        .one(db)
        .await?
        .is_some()
    {
        candidate = format!("{base}-{suffix}");
        suffix += 1;
    }

    Ok(candidate)
}

/// Finds an order by its receipt number.
pub async fn get_order_by_receipt(
    db: &DatabaseConnection,
    receipt_number: &str,
) -> Result<Option<order::Model>> {
    Order::find()
        .filter(order::Column::ReceiptNumber.eq(receipt_number))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all orders placed on the given UTC date, oldest first.
pub async fn list_orders_by_date(
    db: &DatabaseConnection,
    date: NaiveDate,
) -> Result<Vec<order::Model>> {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    let end = start + Duration::days(1);

    Order::find()
        .filter(order::Column::PlacedAt.gte(start))
        .filter(order::Column::PlacedAt.lt(end))
        .order_by_asc(order::Column::PlacedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves an order header together with all of its items.
pub async fn get_order_detail(db: &DatabaseConnection, order_id: i64) -> Result<PlacedOrder> {
    let order = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    let items = OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .order_by_asc(order_item::Column::Id)
        .all(db)
        .await?;

    Ok(PlacedOrder { order, items })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{core::draft::OrderDraft, test_utils::*};
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_place_order_empty_draft() -> Result<()> {
        let db = setup_test_db().await?;

        let draft = OrderDraft::new();
        let result = place_order(&db, &draft).await;

        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_place_order_integration() -> Result<()> {
        let (db, latte) = setup_with_priced_recipe().await?;

        let mut draft = OrderDraft::new();
        draft.add_item(latte.id, 2)?;

        let placed = place_order(&db, &draft).await?;

        assert_eq!(placed.items.len(), 1);
        assert_eq!(placed.items[0].recipe_name, latte.name);
        assert_eq!(placed.items[0].unit_price, 18150);
        assert_eq!(placed.items[0].quantity, 2);
        assert_eq!(placed.items[0].line_total, 36300);
        assert_eq!(placed.order.total, 36300);
        assert_eq!(placed.order.status, STATUS_COMPLETED);

        Ok(())
    }

    #[tokio::test]
    async fn test_place_order_three_items_totals() -> Result<()> {
        let db = setup_test_db().await?;

        let beans = create_custom_material(&db, "Beans", 1000).await?;
        let milk = create_custom_material(&db, "Milk", 45).await?;
        let latte = create_test_recipe(&db, "Latte").await?;
        let americano = create_test_recipe(&db, "Americano").await?;
        let flat_white = create_test_recipe(&db, "Flat White").await?;
        crate::core::recipe::set_line(&db, latte.id, beans.id, 5).await?;
        crate::core::recipe::set_line(&db, latte.id, milk.id, 200).await?;
        crate::core::recipe::set_line(&db, americano.id, beans.id, 5).await?;
        crate::core::recipe::set_line(&db, flat_white.id, milk.id, 180).await?;

        let mut draft = OrderDraft::new();
        draft.add_item(latte.id, 1)?;
        draft.add_item(americano.id, 3)?;
        draft.add_item(flat_white.id, 2)?;

        let placed = place_order(&db, &draft).await?;

        assert_eq!(placed.items.len(), 3);
        let sum: i64 = placed.items.iter().map(|i| i.line_total).sum();
        assert_eq!(placed.order.total, sum);
        for item in &placed.items {
            assert_eq!(item.line_total, item.unit_price * item.quantity);
            assert_eq!(item.order_id, placed.order.id);
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_place_order_atomicity_on_failure() -> Result<()> {
        let db = setup_test_db().await?;

        let beans = create_test_material(&db, "Beans").await?;
        let latte = create_test_recipe(&db, "Latte").await?;
        let americano = create_test_recipe(&db, "Americano").await?;
        crate::core::recipe::set_line(&db, latte.id, beans.id, 5).await?;
        crate::core::recipe::set_line(&db, americano.id, beans.id, 4).await?;
        // Priceless: no material lines, so it cannot be sold
        let empty = create_test_recipe(&db, "Empty Special").await?;

        let mut draft = OrderDraft::new();
        draft.add_item(latte.id, 1)?;
        draft.add_item(americano.id, 1)?;
        draft.add_item(empty.id, 1)?;

        let result = place_order(&db, &draft).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::EmptyRecipe { name } if name == "Empty Special"
        ));

        // Nothing was persisted: no order, no items
        assert!(Order::find().all(&db).await?.is_empty());
        assert!(OrderItem::find().all(&db).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_order_price_snapshot_is_immutable() -> Result<()> {
        let db = setup_test_db().await?;

        let beans = create_custom_material(&db, "Beans", 1000).await?;
        let latte = create_custom_recipe(&db, "Latte", None, Some(3.3)).await?;
        crate::core::recipe::set_line(&db, latte.id, beans.id, 5).await?;

        let mut draft = OrderDraft::new();
        draft.add_item(latte.id, 1)?;
        let placed = place_order(&db, &draft).await?;
        assert_eq!(placed.items[0].unit_price, 18150);

        // Later catalog edits must not touch the recorded snapshot
        crate::core::material::update_material(&db, beans.id, "Beans".to_string(), 2000).await?;
        crate::core::recipe::update_recipe(&db, latte.id, "Latte".to_string(), None, Some(5.0))
            .await?;

        let reread = get_order_detail(&db, placed.order.id).await?;
        assert_eq!(reread.items[0].unit_price, 18150);
        assert_eq!(reread.order.total, 18150);

        // While the live price has moved on
        let current = crate::core::pricing::compute_price(&db, latte.id)
            .await?
            .unwrap();
        assert_ne!(current.final_price, 18150);

        Ok(())
    }

    #[tokio::test]
    async fn test_order_items_survive_recipe_deletion() -> Result<()> {
        let (db, latte) = setup_with_priced_recipe().await?;

        let mut draft = OrderDraft::new();
        draft.add_item(latte.id, 1)?;
        let placed = place_order(&db, &draft).await?;

        crate::core::recipe::delete_recipe(&db, latte.id).await?;

        // The item keeps the recipe name and price for display
        let reread = get_order_detail(&db, placed.order.id).await?;
        assert_eq!(reread.items[0].recipe_name, latte.name);
        assert_eq!(reread.items[0].unit_price, 18150);

        Ok(())
    }

    #[tokio::test]
    async fn test_receipt_number_format_and_collisions() -> Result<()> {
        let db = setup_test_db().await?;

        let placed_at = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();

        let first = next_receipt_number(&db, placed_at).await?;
        assert_eq!(first, "20260806-120000");

        // Occupy the base number, then the first suffix
        for receipt in ["20260806-120000", "20260806-120000-2"] {
            let order = order::ActiveModel {
                receipt_number: Set(receipt.to_string()),
                placed_at: Set(placed_at),
                total: Set(0),
                status: Set(STATUS_COMPLETED.to_string()),
                ..Default::default()
            };
            order.insert(&db).await?;
        }

        let next = next_receipt_number(&db, placed_at).await?;
        assert_eq!(next, "20260806-120000-3");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_order_by_receipt() -> Result<()> {
        let (db, latte) = setup_with_priced_recipe().await?;

        let mut draft = OrderDraft::new();
        draft.add_item(latte.id, 1)?;
        let placed = place_order(&db, &draft).await?;

        let found = get_order_by_receipt(&db, &placed.order.receipt_number).await?;
        assert_eq!(found.unwrap().id, placed.order.id);

        let missing = get_order_by_receipt(&db, "19700101-000000").await?;
        assert!(missing.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_list_orders_by_date() -> Result<()> {
        let (db, latte) = setup_with_priced_recipe().await?;

        let mut draft = OrderDraft::new();
        draft.add_item(latte.id, 1)?;
        let first = place_order(&db, &draft).await?;
        let second = place_order(&db, &draft).await?;

        let today = Utc::now().date_naive();
        let orders = list_orders_by_date(&db, today).await?;
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, first.order.id);
        assert_eq!(orders[1].id, second.order.id);

        // A day with no orders is empty
        let yesterday = today.pred_opt().unwrap();
        assert!(list_orders_by_date(&db, yesterday).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_order_detail_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = get_order_detail(&db, 999).await;
        assert!(matches!(result.unwrap_err(), Error::OrderNotFound { id: 999 }));

        Ok(())
    }
}
