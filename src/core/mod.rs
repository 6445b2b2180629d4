/// Category business logic - grouping labels for recipes
pub mod category;

/// Order draft - in-memory order being assembled before submission
pub mod draft;

/// Material business logic - priced raw ingredients and the deletion guard
pub mod material;

/// Order ledger - append-only record of placed orders
pub mod order;

/// Price calculator - the raw/secondary/final pricing pipeline
pub mod pricing;

/// Recipe business logic - menu items composed of material lines
pub mod recipe;

/// Reporting - daily sales projections and display formatting
pub mod report;
