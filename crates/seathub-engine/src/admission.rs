//! Borrow admission and return handling.
//!
//! The borrow path is the system's one critical section: read budget,
//! check capacity, classify commit vs. overage, consult the spend guard,
//! then persist all side effects in a single ledger transaction — all
//! under the tool's lock. Denials are typed, expected outcomes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use seathub_core::error::AppError;
use seathub_core::result::AppResult;
use seathub_core::types::id::{BorrowId, ChargeId};
use seathub_database::repositories::{BudgetRepository, LedgerRepository};
use seathub_entity::borrow::BorrowRecord;
use seathub_entity::budget::{ToolBudgetSummary, ToolStatus};
use seathub_entity::charge::OverageCharge;

use crate::locks::ToolLocks;
use crate::spend::SpendGuard;

/// A granted borrow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowGrant {
    /// Identifier the caller presents to return the seat.
    pub borrow_id: BorrowId,
    /// Tool the seat belongs to.
    pub tool: String,
    /// Requester identity.
    pub user: String,
    /// When the seat was borrowed.
    pub borrowed_at: DateTime<Utc>,
    /// Whether the seat landed in the overage tier.
    pub is_overage: bool,
}

/// Decides and records seat admissions against the budget store and seat
/// ledger.
#[derive(Debug)]
pub struct AdmissionEngine {
    budgets: Arc<BudgetRepository>,
    ledger: Arc<LedgerRepository>,
    spend: Arc<SpendGuard>,
    locks: Arc<ToolLocks>,
}

impl AdmissionEngine {
    /// Create a new admission engine.
    pub fn new(
        budgets: Arc<BudgetRepository>,
        ledger: Arc<LedgerRepository>,
        spend: Arc<SpendGuard>,
        locks: Arc<ToolLocks>,
    ) -> Self {
        Self {
            budgets,
            ledger,
            spend,
            locks,
        }
    }

    /// Borrow one seat of `tool` for `user`.
    ///
    /// Grants first-come-first-served. The seat counts against commit
    /// while `borrowed < commit_qty`; the borrow at index `commit_qty`
    /// is the first overage seat. Overage borrows record a permanent
    /// charge at the current per-license price and are blocked by the
    /// spend cap *before* any state changes — charges are irreversible
    /// once recorded.
    pub async fn borrow(&self, tool: &str, user: &str) -> AppResult<BorrowGrant> {
        let lock = self.locks.for_tool(tool);
        let _guard = lock.lock().await;

        let budget = self
            .budgets
            .find(tool)
            .await?
            .ok_or_else(|| AppError::unknown_tool(tool))?;

        if budget.borrowed >= budget.total {
            tracing::warn!(tool, user, borrowed = budget.borrowed, "borrow denied: exhausted");
            return Err(AppError::exhausted(tool));
        }

        let is_overage = budget.next_borrow_is_overage();
        if is_overage {
            if budget.current_overage() >= budget.max_overage {
                tracing::warn!(tool, user, "borrow denied: overage ceiling reached");
                return Err(AppError::max_overage(tool));
            }
            if budget.max_spend.is_some() {
                let allowed = self
                    .spend
                    .check_cap(&budget, budget.overage_price_per_license)
                    .await?;
                if !allowed {
                    tracing::warn!(tool, user, "borrow denied: spend cap exceeded");
                    return Err(AppError::spend_cap(format!(
                        "monthly overage spend cap would be exceeded for {tool}"
                    )));
                }
            }
        }

        let borrow_id = BorrowId::new();
        let borrowed_at = Utc::now();
        let record = BorrowRecord {
            id: borrow_id.into_uuid(),
            tool: tool.to_string(),
            user: user.to_string(),
            borrowed_at,
            is_overage,
        };
        let charge = (is_overage && budget.overage_price_per_license > 0.0).then(|| OverageCharge {
            id: ChargeId::new().into_uuid(),
            tool: tool.to_string(),
            borrow_id: borrow_id.into_uuid(),
            user: user.to_string(),
            charged_at: borrowed_at,
            amount: budget.overage_price_per_license,
        });

        self.ledger.commit_borrow(&record, charge.as_ref()).await?;

        tracing::info!(
            tool,
            user,
            %borrow_id,
            borrowed = budget.borrowed + 1,
            total = budget.total,
            is_overage,
            "borrow granted"
        );

        Ok(BorrowGrant {
            borrow_id,
            tool: tool.to_string(),
            user: user.to_string(),
            borrowed_at,
            is_overage,
        })
    }

    /// Return a borrowed seat. Yields the tool name the seat belonged to.
    ///
    /// Returning the same id twice yields `NotFound` on the second call —
    /// the record is gone and the count is never double-decremented.
    /// Overage charges are untouched; they are permanent history.
    pub async fn release(&self, borrow_id: BorrowId) -> AppResult<String> {
        let Some(record) = self.ledger.find_borrow(borrow_id.into_uuid()).await? else {
            tracing::warn!(%borrow_id, "return denied: borrow record not found");
            return Err(AppError::not_found(format!(
                "borrow record not found: {borrow_id}"
            )));
        };

        let lock = self.locks.for_tool(&record.tool);
        let _guard = lock.lock().await;

        match self.ledger.commit_return(borrow_id.into_uuid()).await? {
            Some(tool) => {
                tracing::info!(%borrow_id, tool, "seat returned");
                Ok(tool)
            }
            // Another return beat us to the record between the peek and
            // the lock.
            None => Err(AppError::not_found(format!(
                "borrow record not found: {borrow_id}"
            ))),
        }
    }

    /// Status snapshot for one tool. Pure read, no mutation.
    pub async fn status(&self, tool: &str) -> AppResult<Option<ToolStatus>> {
        let Some(budget) = self.budgets.find(tool).await? else {
            return Ok(None);
        };
        let overage_borrows = self.ledger.count_charges(tool).await?;
        Ok(Some(ToolStatus::derive(&budget, overage_borrows)))
    }

    /// Budget summaries for every tool, alphabetical by name.
    pub async fn list_tools(&self) -> AppResult<Vec<ToolBudgetSummary>> {
        self.budgets.list_summaries().await
    }

    /// Active borrows, newest first, optionally filtered by requester.
    pub async fn list_borrows(&self, user: Option<&str>) -> AppResult<Vec<BorrowRecord>> {
        self.ledger.list_borrows(user).await
    }

    /// Overage charge history, newest first, optionally filtered by tool.
    pub async fn list_charges(&self, tool: Option<&str>) -> AppResult<Vec<OverageCharge>> {
        self.ledger.list_charges(tool).await
    }
}
