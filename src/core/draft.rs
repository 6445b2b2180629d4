//! Order draft - the in-memory order being assembled before submission.
//!
//! The draft is a plain value the UI renders from; it owns the "current
//! order" state instead of a widget table. Prices are not resolved here:
//! unit prices are snapshotted by `core::order::place_order` at submission
//! time, inside the same transaction that persists the order.

use crate::errors::{Error, Result};

/// One recipe-and-quantity line in a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftLine {
    /// ID of the recipe to sell
    pub recipe_id: i64,
    /// Number of units, always positive
    pub quantity: i64,
}

/// An order being assembled, not yet persisted
#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    lines: Vec<DraftLine>,
}

impl OrderDraft {
    /// Creates an empty draft.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Adds a recipe to the draft. Adding a recipe that is already present
    /// increases its quantity instead of creating a second line.
    pub fn add_item(&mut self, recipe_id: i64, quantity: i64) -> Result<()> {
        if quantity <= 0 {
            return Err(Error::InvalidAmount { amount: quantity });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.recipe_id == recipe_id) {
            line.quantity += quantity;
        } else {
            self.lines.push(DraftLine {
                recipe_id,
                quantity,
            });
        }
        Ok(())
    }

    /// Replaces the quantity of a recipe already in the draft.
    pub fn set_quantity(&mut self, recipe_id: i64, quantity: i64) -> Result<()> {
        if quantity <= 0 {
            return Err(Error::InvalidAmount { amount: quantity });
        }

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.recipe_id == recipe_id)
            .ok_or_else(|| Error::RecipeNotFound {
                name: recipe_id.to_string(),
            })?;
        line.quantity = quantity;
        Ok(())
    }

    /// Removes a recipe from the draft. Removing an absent recipe is a no-op.
    pub fn remove_item(&mut self, recipe_id: i64) {
        self.lines.retain(|l| l.recipe_id != recipe_id);
    }

    /// Empties the draft.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// True when the draft holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The draft's lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }
}
