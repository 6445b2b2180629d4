//! Reporting - sales projections over the order ledger and display helpers.
//!
//! These are simple read paths consumed by reporting views. Number
//! formatting lives here because every view prints prices the same way;
//! the pricing interface itself stays numeric.

use crate::{
    core::{order, pricing::RecipePrice},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Aggregated sales for one calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySales {
    /// The UTC date the summary covers
    pub date: NaiveDate,
    /// Number of orders placed on that date
    pub order_count: usize,
    /// Sum of the order totals
    pub total_sales: i64,
}

/// Summarizes the orders placed on the given UTC date.
pub async fn daily_sales(db: &DatabaseConnection, date: NaiveDate) -> Result<DailySales> {
    let orders = order::list_orders_by_date(db, date).await?;
    let total_sales = orders.iter().map(|o| o.total).sum();

    Ok(DailySales {
        date,
        order_count: orders.len(),
        total_sales,
    })
}

/// Formats a price with thousands separators, e.g. `18150` -> `"18,150"`.
#[must_use]
pub fn format_price(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Formats one price-listing row: all pipeline stages plus the factor used.
#[must_use]
pub fn format_price_line(entry: &RecipePrice) -> String {
    let category = entry.category.as_deref().unwrap_or("uncategorized");
    format!(
        "{} [{}]: raw {} | marked up {} | final {} (factor {:.2})",
        entry.recipe_name,
        category,
        format_price(entry.quote.raw),
        format_price(entry.quote.secondary),
        format_price(entry.quote.final_price),
        entry.quote.factor_used,
    )
}
