//! Tool budget entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A per-tool license budget: the durable record of capacity and pricing.
///
/// `total`, `commit_qty`, and `max_overage` are the *active* limits the
/// admission engine enforces. The `vendor_*` fields are the ceiling set by
/// the seat-pool owner; customer edits may only tighten within them. The
/// `customer_*` fields record the last customer-applied restriction for
/// audit.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ToolBudget {
    /// Tool name (unique key).
    pub tool: String,
    /// Hard ceiling on concurrent borrows.
    pub total: i64,
    /// Seats currently borrowed.
    pub borrowed: i64,
    /// Seats always grantable without the overage flag.
    pub commit_qty: i64,
    /// Maximum seats grantable beyond commit.
    pub max_overage: i64,
    /// Flat recurring cost for the committed quantity.
    pub commit_price: f64,
    /// Cost charged per overage borrow event.
    pub overage_price_per_license: f64,
    /// Vendor ceiling on total (None = never recorded).
    pub vendor_total: Option<i64>,
    /// Vendor ceiling on commit quantity.
    pub vendor_commit_qty: Option<i64>,
    /// Vendor ceiling on max overage.
    pub vendor_max_overage: Option<i64>,
    /// Last customer-applied restriction on total (audit).
    pub customer_total: Option<i64>,
    /// Last customer-applied restriction on commit quantity (audit).
    pub customer_commit_qty: Option<i64>,
    /// Last customer-applied restriction on max overage (audit).
    pub customer_max_overage: Option<i64>,
    /// Customer-set monthly overage spend cap (None = unlimited).
    pub max_spend: Option<f64>,
}

impl ToolBudget {
    /// Seats still grantable before the hard ceiling.
    pub fn available(&self) -> i64 {
        (self.total - self.borrowed).max(0)
    }

    /// Seats currently held beyond the committed quantity.
    pub fn current_overage(&self) -> i64 {
        (self.borrowed - self.commit_qty).max(0)
    }

    /// Whether the next borrow would land in the overage tier.
    ///
    /// The commit-th seat (zero-based index `commit_qty - 1`) is the last
    /// non-overage seat; the borrow at index `commit_qty` is the first
    /// overage seat.
    pub fn next_borrow_is_overage(&self) -> bool {
        self.borrowed >= self.commit_qty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budget(total: i64, borrowed: i64, commit_qty: i64) -> ToolBudget {
        ToolBudget {
            tool: "cad_tool".to_string(),
            total,
            borrowed,
            commit_qty,
            max_overage: total - commit_qty,
            commit_price: 1000.0,
            overage_price_per_license: 100.0,
            vendor_total: None,
            vendor_commit_qty: None,
            vendor_max_overage: None,
            customer_total: None,
            customer_commit_qty: None,
            customer_max_overage: None,
            max_spend: None,
        }
    }

    #[test]
    fn test_commit_overage_boundary() {
        // commit_qty = 1: the first borrow is commit, the second is overage.
        let b = budget(2, 0, 1);
        assert!(!b.next_borrow_is_overage());
        let b = budget(2, 1, 1);
        assert!(b.next_borrow_is_overage());
        assert_eq!(b.current_overage(), 0);
        let b = budget(2, 2, 1);
        assert_eq!(b.current_overage(), 1);
    }

    #[test]
    fn test_available_never_negative() {
        let b = budget(2, 2, 1);
        assert_eq!(b.available(), 0);
    }
}
