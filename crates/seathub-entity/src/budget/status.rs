//! Derived status snapshot of a tool budget.

use serde::{Deserialize, Serialize};

use super::model::ToolBudget;

/// Point-in-time view of a tool's seat pool and cost position.
///
/// `current_overage_cost` is **all-time cumulative**: it reflects every
/// overage charge ever recorded for the tool (charges survive returns),
/// priced at the current per-license rate. Month-scoped accounting lives
/// in the spend guard, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolStatus {
    /// Tool name.
    pub tool: String,
    /// Hard ceiling on concurrent borrows.
    pub total: i64,
    /// Seats currently borrowed.
    pub borrowed: i64,
    /// Seats still grantable.
    pub available: i64,
    /// Committed quantity.
    pub commit: i64,
    /// Overage ceiling.
    pub max_overage: i64,
    /// Seats currently held beyond commit.
    pub overage: i64,
    /// Count of overage charges ever recorded.
    pub overage_borrows: i64,
    /// Whether current usage is within the committed quantity.
    pub in_commit: bool,
    /// Flat recurring cost for the committed quantity.
    pub commit_price: f64,
    /// Cost charged per overage borrow event.
    pub overage_price_per_license: f64,
    /// All-time cumulative overage cost.
    pub current_overage_cost: f64,
    /// Commit price plus cumulative overage cost.
    pub total_cost: f64,
}

impl ToolStatus {
    /// Derive a status snapshot from a budget row and the all-time
    /// overage charge count.
    pub fn derive(budget: &ToolBudget, overage_borrows: i64) -> Self {
        let current_overage_cost = overage_borrows as f64 * budget.overage_price_per_license;
        Self {
            tool: budget.tool.clone(),
            total: budget.total,
            borrowed: budget.borrowed,
            available: budget.available(),
            commit: budget.commit_qty,
            max_overage: budget.max_overage,
            overage: budget.current_overage(),
            overage_borrows,
            in_commit: budget.borrowed <= budget.commit_qty,
            commit_price: budget.commit_price,
            overage_price_per_license: budget.overage_price_per_license,
            current_overage_cost,
            total_cost: budget.commit_price + current_overage_cost,
        }
    }
}
