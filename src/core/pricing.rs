//! Price calculator - turns a recipe's material composition into the price
//! shown to the customer.
//!
//! The pipeline is a fixed sequence of multiplicative steps with fixed
//! rounding points:
//!
//! 1. raw price: sum of per-gram price × grams over all lines, rounded
//!    half-to-even
//! 2. secondary price: raw × markup factor, rounded half-to-even
//! 3. price with tax: secondary × 1.1, rounded half-to-even
//! 4. final price: ceiling of the price with tax
//!
//! Every consumer (price listing, search, order placement) goes through
//! [`quote_lines`], so the arithmetic exists in exactly one place. A recipe
//! with no lines has no price at all and is excluded from listings rather
//! than priced at zero.

use crate::{
    entities::{Category, Material, Recipe, RecipeLine, recipe, recipe_line},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, prelude::*};
use std::collections::HashMap;

/// Markup factor used when a recipe has none set, or a non-positive one
pub const DEFAULT_PRICE_FACTOR: f64 = 3.3;

/// Tax multiplier applied to the secondary price
pub const TAX_MULTIPLIER: f64 = 1.1;

/// One material line's contribution to a recipe's cost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCost {
    /// Price of the material per gram
    pub price_per_gram: i64,
    /// Quantity of the material in grams
    pub grams: i64,
}

/// The stages of a computed price, all retained for display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    /// Aggregated material cost
    pub raw: i64,
    /// Raw price with the markup factor applied
    pub secondary: i64,
    /// Customer-facing price after tax and final rounding
    pub final_price: i64,
    /// The markup factor that was actually applied
    pub factor_used: f64,
}

/// A priced recipe as shown by the price listing and search views
#[derive(Debug, Clone, PartialEq)]
pub struct RecipePrice {
    /// Recipe name
    pub recipe_name: String,
    /// Category name, if the recipe has one
    pub category: Option<String>,
    /// The computed price stages
    pub quote: PriceQuote,
}

/// Resolves the markup factor a recipe actually prices with. Missing and
/// non-positive factors silently fall back to the default.
fn effective_factor(factor: Option<f64>) -> f64 {
    factor
        .filter(|f| f.is_finite() && *f > 0.0)
        .unwrap_or(DEFAULT_PRICE_FACTOR)
}

/// Computes the price stages for a set of material lines.
///
/// Returns None for an empty line set: a recipe without materials has no
/// price, which is different from a price of zero.
// Cast safety: catalog prices and quantities are small integers (a café
// menu), so the f64 round trip is exact and the i64 conversion cannot
// truncate in practice.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
#[must_use]
pub fn quote_lines(lines: &[LineCost], factor: Option<f64>) -> Option<PriceQuote> {
    if lines.is_empty() {
        return None;
    }

    let factor_used = effective_factor(factor);

    let cost: f64 = lines
        .iter()
        .map(|line| (line.price_per_gram * line.grams) as f64)
        .sum();
    let raw = cost.round_ties_even();
    let secondary = (raw * factor_used).round_ties_even();
    let with_tax = (secondary * TAX_MULTIPLIER).round_ties_even();
    let final_price = with_tax.ceil();

    Some(PriceQuote {
        raw: raw as i64,
        secondary: secondary as i64,
        final_price: final_price as i64,
        factor_used,
    })
}

/// Computes the price of a single recipe from current catalog state.
///
/// Returns `Ok(None)` when the recipe has no material lines. Usable inside
/// a transaction, which is how order placement snapshots its unit prices.
pub async fn compute_price<C>(db: &C, recipe_id: i64) -> Result<Option<PriceQuote>>
where
    C: ConnectionTrait,
{
    let recipe = Recipe::find_by_id(recipe_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::RecipeNotFound {
            name: recipe_id.to_string(),
        })?;

    quote_recipe(db, &recipe).await
}

/// Computes the price stages for an already-loaded recipe.
pub(crate) async fn quote_recipe<C>(db: &C, recipe: &recipe::Model) -> Result<Option<PriceQuote>>
where
    C: ConnectionTrait,
{
    let lines = RecipeLine::find()
        .filter(recipe_line::Column::RecipeId.eq(recipe.id))
        .all(db)
        .await?;

    let mut costs = Vec::with_capacity(lines.len());
    for line in lines {
        let material = Material::find_by_id(line.material_id)
            .one(db)
            .await?
            .ok_or_else(|| Error::MaterialNotFound {
                name: line.material_id.to_string(),
            })?;
        costs.push(LineCost {
            price_per_gram: material.price_per_gram,
            grams: line.grams,
        });
    }

    Ok(quote_lines(&costs, recipe.price_factor))
}

/// Computes prices for every recipe that has at least one material line,
/// joined with recipe name and category, ordered by recipe name.
///
/// Zero-line recipes are excluded entirely rather than listed at zero.
pub async fn compute_all_prices(db: &DatabaseConnection) -> Result<Vec<RecipePrice>> {
    let recipes = Recipe::find()
        .order_by_asc(recipe::Column::Name)
        .all(db)
        .await?;
    let categories: HashMap<i64, String> = Category::find()
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    let materials: HashMap<i64, i64> = Material::find()
        .all(db)
        .await?
        .into_iter()
        .map(|m| (m.id, m.price_per_gram))
        .collect();

    let mut lines_by_recipe: HashMap<i64, Vec<LineCost>> = HashMap::new();
    for line in RecipeLine::find().all(db).await? {
        let price_per_gram =
            *materials
                .get(&line.material_id)
                .ok_or_else(|| Error::MaterialNotFound {
                    name: line.material_id.to_string(),
                })?;
        lines_by_recipe.entry(line.recipe_id).or_default().push(LineCost {
            price_per_gram,
            grams: line.grams,
        });
    }

    let mut prices = Vec::new();
    for recipe in recipes {
        let Some(costs) = lines_by_recipe.get(&recipe.id) else {
            continue;
        };
        let Some(quote) = quote_lines(costs, recipe.price_factor) else {
            continue;
        };
        let category = recipe
            .category_id
            .and_then(|id| categories.get(&id).cloned());
        prices.push(RecipePrice {
            recipe_name: recipe.name,
            category,
            quote,
        });
    }

    Ok(prices)
}

/// Filters the price listing down to recipes whose name contains the query,
/// case-insensitively. Same arithmetic as [`compute_all_prices`]: the search
/// view and the listing view display identical numbers.
pub async fn search_prices(db: &DatabaseConnection, query: &str) -> Result<Vec<RecipePrice>> {
    let needle = query.trim().to_lowercase();
    let mut prices = compute_all_prices(db).await?;
    prices.retain(|p| p.recipe_name.to_lowercase().contains(&needle));
    Ok(prices)
}
