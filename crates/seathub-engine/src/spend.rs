//! Month-to-date overage spend tracking and cap enforcement.
//!
//! This is deliberately distinct from the all-time cumulative cost in the
//! status snapshot: the spend cap is a monthly budget, so the guard sums
//! only charges recorded within the current UTC calendar month, at the
//! amounts they were recorded at.

use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveTime, TimeZone, Utc};

use seathub_core::error::AppError;
use seathub_core::result::AppResult;
use seathub_database::repositories::{BudgetRepository, LedgerRepository};
use seathub_entity::budget::ToolBudget;

/// Tracks month-to-date overage spend per tool and enforces the optional
/// customer-set spend cap before an overage borrow is admitted.
#[derive(Debug)]
pub struct SpendGuard {
    budgets: Arc<BudgetRepository>,
    ledger: Arc<LedgerRepository>,
}

impl SpendGuard {
    /// Create a new spend guard.
    pub fn new(budgets: Arc<BudgetRepository>, ledger: Arc<LedgerRepository>) -> Self {
        Self { budgets, ledger }
    }

    /// Sum of overage charge amounts recorded for the tool within the
    /// current UTC calendar month.
    pub async fn month_to_date_overage_cost(&self, tool: &str) -> AppResult<f64> {
        self.budgets
            .find(tool)
            .await?
            .ok_or_else(|| AppError::unknown_tool(tool))?;
        self.month_to_date(tool).await
    }

    /// Whether admitting one more overage borrow at `candidate_cost` stays
    /// within the tool's spend cap. A tool without a cap always passes.
    pub async fn check_spend_cap(&self, tool: &str, candidate_cost: f64) -> AppResult<bool> {
        let budget = self
            .budgets
            .find(tool)
            .await?
            .ok_or_else(|| AppError::unknown_tool(tool))?;
        self.check_cap(&budget, candidate_cost).await
    }

    /// Cap check against an already-loaded budget row. The admission
    /// engine calls this inside its per-tool critical section so the
    /// budget is read exactly once per decision.
    pub(crate) async fn check_cap(&self, budget: &ToolBudget, candidate_cost: f64) -> AppResult<bool> {
        let Some(cap) = budget.max_spend else {
            return Ok(true);
        };
        let month_to_date = self.month_to_date(&budget.tool).await?;
        Ok(month_to_date + candidate_cost <= cap)
    }

    /// Set (or clear, with `None`) the monthly overage spend cap.
    pub async fn set_max_spend(&self, tool: &str, max_spend: Option<f64>) -> AppResult<()> {
        let updated = self.budgets.set_max_spend(tool, max_spend).await?;
        if !updated {
            return Err(AppError::unknown_tool(tool));
        }
        tracing::info!(tool, ?max_spend, "spend cap updated");
        Ok(())
    }

    async fn month_to_date(&self, tool: &str) -> AppResult<f64> {
        let since = start_of_month(Utc::now());
        let charges = self.ledger.list_charges(Some(tool)).await?;
        Ok(charges
            .iter()
            .filter(|c| c.charged_at >= since)
            .map(|c| c.amount)
            .sum())
    }
}

/// First instant of the UTC calendar month containing `now`.
fn start_of_month(now: DateTime<Utc>) -> DateTime<Utc> {
    let first = now
        .date_naive()
        .with_day(1)
        .unwrap_or_else(|| now.date_naive());
    Utc.from_utc_datetime(&first.and_time(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use uuid::Uuid;

    use seathub_core::error::ErrorKind;
    use seathub_entity::borrow::BorrowRecord;
    use seathub_entity::charge::OverageCharge;

    use crate::test_support::{harness, tool};

    use super::*;

    #[test]
    fn test_start_of_month() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 15, 42, 7).unwrap();
        let start = start_of_month(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap());
    }

    fn backdated_charge(tool: &str, charged_at: DateTime<Utc>, amount: f64) -> (BorrowRecord, OverageCharge) {
        let borrow_id = Uuid::new_v4();
        let record = BorrowRecord {
            id: borrow_id,
            tool: tool.to_string(),
            user: "alice".to_string(),
            borrowed_at: charged_at,
            is_overage: true,
        };
        let charge = OverageCharge {
            id: Uuid::new_v4(),
            tool: tool.to_string(),
            borrow_id,
            user: "alice".to_string(),
            charged_at,
            amount,
        };
        (record, charge)
    }

    #[tokio::test]
    async fn test_month_to_date_excludes_prior_months() {
        let h = harness(&[tool("cad_tool", 10, 1, 9, 100.0)]).await;

        let last_month = start_of_month(Utc::now()) - Duration::days(3);
        let (record, charge) = backdated_charge("cad_tool", last_month, 100.0);
        h.ledger.commit_borrow(&record, Some(&charge)).await.unwrap();

        let (record, charge) = backdated_charge("cad_tool", Utc::now(), 50.0);
        h.ledger.commit_borrow(&record, Some(&charge)).await.unwrap();

        let mtd = h.spend.month_to_date_overage_cost("cad_tool").await.unwrap();
        assert_eq!(mtd, 50.0);
    }

    #[tokio::test]
    async fn test_check_spend_cap_boundary() {
        let h = harness(&[tool("cad_tool", 10, 1, 9, 100.0)]).await;
        h.spend.set_max_spend("cad_tool", Some(120.0)).await.unwrap();

        let (record, charge) = backdated_charge("cad_tool", Utc::now(), 50.0);
        h.ledger.commit_borrow(&record, Some(&charge)).await.unwrap();

        // 50 + 70 == 120: exactly at the cap is still allowed.
        assert!(h.spend.check_spend_cap("cad_tool", 70.0).await.unwrap());
        assert!(!h.spend.check_spend_cap("cad_tool", 80.0).await.unwrap());
    }

    #[tokio::test]
    async fn test_no_cap_always_allows() {
        let h = harness(&[tool("cad_tool", 10, 1, 9, 100.0)]).await;
        assert!(h.spend.check_spend_cap("cad_tool", 1e12).await.unwrap());
    }

    #[tokio::test]
    async fn test_set_max_spend_unknown_tool() {
        let h = harness(&[]).await;
        let err = h.spend.set_max_spend("ghost", Some(10.0)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownTool);
    }
}
