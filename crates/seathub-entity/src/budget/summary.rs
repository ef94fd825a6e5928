//! Compact tool budget listing.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of the tool budget listing (read-only enumeration).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ToolBudgetSummary {
    /// Tool name.
    pub tool: String,
    /// Hard ceiling on concurrent borrows.
    pub total: i64,
    /// Seats currently borrowed.
    pub borrowed: i64,
    /// Committed quantity.
    pub commit_qty: i64,
    /// Overage ceiling.
    pub max_overage: i64,
    /// Flat recurring cost for the committed quantity.
    pub commit_price: f64,
    /// Cost charged per overage borrow event.
    pub overage_price_per_license: f64,
}
