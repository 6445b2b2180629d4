//! Unified error types for the café ledger.
//!
//! All fallible operations in the crate return [`Result`]. Validation and
//! referential-integrity problems are rejected at the mutation boundary with
//! a specific variant; storage failures are wrapped with their underlying
//! cause.

use thiserror::Error;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration or input validation problem with a human-readable reason
    #[error("Configuration error: {message}")]
    Config {
        /// User-facing description of what was rejected
        message: String,
    },

    /// A price or quantity that must be positive was not
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The offending value
        amount: i64,
    },

    /// A unique name is already taken by another catalog entry
    #[error("Name already in use: {name}")]
    DuplicateName {
        /// The conflicting name
        name: String,
    },

    /// No material with the given name or id exists
    #[error("Material not found: {name}")]
    MaterialNotFound {
        /// Name (or stringified id) used for the lookup
        name: String,
    },

    /// No recipe with the given name or id exists
    #[error("Recipe not found: {name}")]
    RecipeNotFound {
        /// Name (or stringified id) used for the lookup
        name: String,
    },

    /// No category with the given name or id exists
    #[error("Category not found: {name}")]
    CategoryNotFound {
        /// Name (or stringified id) used for the lookup
        name: String,
    },

    /// No order with the given id exists
    #[error("Order not found: {id}")]
    OrderNotFound {
        /// The order id used for the lookup
        id: i64,
    },

    /// A material cannot be deleted while recipes still reference it
    #[error("Material '{name}' is still used by recipes: {}", .recipes.join(", "))]
    MaterialInUse {
        /// Name of the material the caller tried to delete
        name: String,
        /// Names of the recipes that reference it
        recipes: Vec<String>,
    },

    /// A recipe with no material lines has no price and cannot be sold
    #[error("Recipe '{name}' has no material lines and no price")]
    EmptyRecipe {
        /// Name of the priceless recipe
        name: String,
    },

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
