//! Budget governance: vendor ceilings and customer restrictions.
//!
//! Vendor writes set the ceiling and reset the active limits to it —
//! a vendor write always wins over any prior customer restriction.
//! Customer writes may only tighten within the vendor ceiling. Both run
//! under the tool's lock so a shrinking edit cannot race an in-flight
//! borrow past `total`.

use std::sync::Arc;

use seathub_core::error::AppError;
use seathub_core::result::AppResult;
use seathub_database::repositories::BudgetRepository;

use crate::locks::ToolLocks;

/// Enforces the vendor-ceiling / customer-restriction hierarchy on
/// budget edits.
#[derive(Debug)]
pub struct BudgetGovernance {
    budgets: Arc<BudgetRepository>,
    locks: Arc<ToolLocks>,
}

impl BudgetGovernance {
    /// Create a new governance front for the budget store.
    pub fn new(budgets: Arc<BudgetRepository>, locks: Arc<ToolLocks>) -> Self {
        Self { budgets, locks }
    }

    /// Vendor-privileged: set the vendor ceilings and reset the active
    /// limits to them.
    ///
    /// Vendor values are trusted inputs; the only hard constraint is that
    /// `total` cannot shrink below live usage.
    pub async fn set_vendor_budget(
        &self,
        tool: &str,
        total: i64,
        commit_qty: i64,
        max_overage: i64,
    ) -> AppResult<()> {
        if total < 0 || commit_qty < 0 || max_overage < 0 {
            return Err(AppError::invalid_budget_edit(
                "budget quantities must be non-negative",
            ));
        }

        let lock = self.locks.for_tool(tool);
        let _guard = lock.lock().await;

        let budget = self
            .budgets
            .find(tool)
            .await?
            .ok_or_else(|| AppError::unknown_tool(tool))?;

        if total < budget.borrowed {
            return Err(AppError::invalid_budget_edit(format!(
                "total {total} is below the {} currently borrowed seats",
                budget.borrowed
            )));
        }

        self.budgets
            .set_vendor_budget(tool, total, commit_qty, max_overage)
            .await?;

        tracing::info!(tool, total, commit_qty, max_overage, "vendor budget set");
        Ok(())
    }

    /// Customer-privileged: tighten the active limits within the vendor
    /// ceiling. Omitted fields keep their current active values.
    ///
    /// When no vendor ceiling was ever recorded, the current active value
    /// stands in as the ceiling for any provided field.
    pub async fn set_customer_restriction(
        &self,
        tool: &str,
        total: Option<i64>,
        commit_qty: Option<i64>,
        max_overage: Option<i64>,
    ) -> AppResult<()> {
        let lock = self.locks.for_tool(tool);
        let _guard = lock.lock().await;

        let budget = self
            .budgets
            .find(tool)
            .await?
            .ok_or_else(|| AppError::unknown_tool(tool))?;

        if let Some(value) = total {
            let ceiling = budget.vendor_total.unwrap_or(budget.total);
            if value > ceiling {
                return Err(AppError::invalid_budget_edit(format!(
                    "total {value} exceeds the vendor ceiling of {ceiling}"
                )));
            }
        }
        if let Some(value) = commit_qty {
            let ceiling = budget.vendor_commit_qty.unwrap_or(budget.commit_qty);
            if value > ceiling {
                return Err(AppError::invalid_budget_edit(format!(
                    "commit quantity {value} exceeds the vendor ceiling of {ceiling}"
                )));
            }
        }
        if let Some(value) = max_overage {
            let ceiling = budget.vendor_max_overage.unwrap_or(budget.max_overage);
            if value > ceiling {
                return Err(AppError::invalid_budget_edit(format!(
                    "max overage {value} exceeds the vendor ceiling of {ceiling}"
                )));
            }
        }

        let total = total.unwrap_or(budget.total);
        let commit_qty = commit_qty.unwrap_or(budget.commit_qty);
        let max_overage = max_overage.unwrap_or(budget.max_overage);

        if total < 0 || commit_qty < 0 || max_overage < 0 {
            return Err(AppError::invalid_budget_edit(
                "budget quantities must be non-negative",
            ));
        }
        if total < budget.borrowed {
            return Err(AppError::invalid_budget_edit(format!(
                "total {total} is below the {} currently borrowed seats",
                budget.borrowed
            )));
        }
        if commit_qty > total {
            return Err(AppError::invalid_budget_edit(format!(
                "commit quantity {commit_qty} exceeds total {total}"
            )));
        }
        if commit_qty + max_overage > total {
            return Err(AppError::invalid_budget_edit(format!(
                "commit {commit_qty} + max overage {max_overage} exceeds total {total}"
            )));
        }

        self.budgets
            .apply_customer_restriction(tool, total, commit_qty, max_overage)
            .await?;

        tracing::info!(tool, total, commit_qty, max_overage, "customer restriction applied");
        Ok(())
    }

    /// Update pricing for a tool.
    ///
    /// Pricing is orthogonal to capacity and deliberately bypasses the
    /// ceiling hierarchy; already-recorded charges keep their amounts.
    /// The only checks are tool existence and a non-negative price —
    /// a stricter guard than capacity edits get, and intentional:
    /// negative prices would corrupt the charge ledger.
    pub async fn update_pricing(
        &self,
        tool: &str,
        commit_price: f64,
        overage_price_per_license: f64,
    ) -> AppResult<()> {
        if commit_price < 0.0 || overage_price_per_license < 0.0 {
            return Err(AppError::invalid_budget_edit(
                "prices must be non-negative",
            ));
        }

        let lock = self.locks.for_tool(tool);
        let _guard = lock.lock().await;

        let updated = self
            .budgets
            .update_pricing(tool, commit_price, overage_price_per_license)
            .await?;
        if !updated {
            return Err(AppError::unknown_tool(tool));
        }

        tracing::info!(tool, commit_price, overage_price_per_license, "pricing updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use seathub_core::error::ErrorKind;

    use crate::test_support::{harness, tool};

    #[tokio::test]
    async fn test_vendor_write_resets_active_limits() {
        let h = harness(&[tool("cad_tool", 10, 8, 2, 100.0)]).await;
        h.governance
            .set_customer_restriction("cad_tool", Some(6), Some(4), Some(2))
            .await
            .unwrap();

        h.governance
            .set_vendor_budget("cad_tool", 20, 15, 5)
            .await
            .unwrap();

        let budget = h.budgets.find("cad_tool").await.unwrap().unwrap();
        assert_eq!(budget.total, 20);
        assert_eq!(budget.commit_qty, 15);
        assert_eq!(budget.max_overage, 5);
        assert_eq!(budget.vendor_total, Some(20));
        // Customer audit fields keep the last restriction.
        assert_eq!(budget.customer_total, Some(6));
    }

    #[tokio::test]
    async fn test_customer_cannot_exceed_vendor_ceiling() {
        let h = harness(&[tool("cad_tool", 10, 8, 2, 100.0)]).await;
        h.governance
            .set_vendor_budget("cad_tool", 3, 2, 1)
            .await
            .unwrap();

        let err = h
            .governance
            .set_customer_restriction("cad_tool", Some(5), None, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidBudgetEdit);
    }

    #[tokio::test]
    async fn test_cannot_shrink_below_live_usage() {
        let h = harness(&[tool("cad_tool", 5, 5, 0, 0.0)]).await;
        h.admission.borrow("cad_tool", "alice").await.unwrap();
        h.admission.borrow("cad_tool", "bob").await.unwrap();

        let err = h
            .governance
            .set_customer_restriction("cad_tool", Some(1), Some(1), Some(0))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidBudgetEdit);

        let err = h
            .governance
            .set_vendor_budget("cad_tool", 1, 1, 0)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidBudgetEdit);
    }

    #[tokio::test]
    async fn test_commit_plus_overage_bounded_by_total() {
        let h = harness(&[tool("cad_tool", 10, 8, 2, 100.0)]).await;
        let err = h
            .governance
            .set_customer_restriction("cad_tool", Some(10), Some(8), Some(3))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidBudgetEdit);
    }

    #[tokio::test]
    async fn test_active_values_are_implicit_ceiling_without_vendor() {
        let h = harness(&[tool("cad_tool", 10, 8, 2, 100.0)]).await;

        // No vendor ceiling recorded: raising above the active total is
        // rejected, tightening below it is fine.
        let err = h
            .governance
            .set_customer_restriction("cad_tool", Some(12), None, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidBudgetEdit);

        h.governance
            .set_customer_restriction("cad_tool", Some(8), Some(6), Some(2))
            .await
            .unwrap();
        let budget = h.budgets.find("cad_tool").await.unwrap().unwrap();
        assert_eq!(budget.total, 8);
        assert_eq!(budget.customer_commit_qty, Some(6));
    }

    #[tokio::test]
    async fn test_update_pricing() {
        let h = harness(&[tool("cad_tool", 10, 8, 2, 100.0)]).await;
        h.governance
            .update_pricing("cad_tool", 2000.0, 150.0)
            .await
            .unwrap();
        let budget = h.budgets.find("cad_tool").await.unwrap().unwrap();
        assert_eq!(budget.commit_price, 2000.0);
        assert_eq!(budget.overage_price_per_license, 150.0);

        let err = h
            .governance
            .update_pricing("ghost", 1.0, 1.0)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownTool);

        let err = h
            .governance
            .update_pricing("cad_tool", -1.0, 1.0)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidBudgetEdit);
    }
}
