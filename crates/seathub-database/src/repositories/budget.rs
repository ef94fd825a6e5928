//! Tool budget repository implementation.
//!
//! Pure CRUD against the `tool_budgets` table. Governance validation
//! (vendor ceilings, live-usage floors) happens in the engine, inside the
//! per-tool critical section.

use sqlx::SqlitePool;

use seathub_core::config::seed::ResolvedSeedTool;
use seathub_core::error::{AppError, ErrorKind};
use seathub_core::result::AppResult;
use seathub_entity::budget::{ToolBudget, ToolBudgetSummary};

/// Repository for tool budget rows.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    pool: SqlitePool,
}

impl BudgetRepository {
    /// Create a new budget repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a tool budget by tool name.
    pub async fn find(&self, tool: &str) -> AppResult<Option<ToolBudget>> {
        sqlx::query_as::<_, ToolBudget>("SELECT * FROM tool_budgets WHERE tool = ?")
            .bind(tool)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find budget", e))
    }

    /// List budget summaries for all tools, alphabetical by tool name.
    pub async fn list_summaries(&self) -> AppResult<Vec<ToolBudgetSummary>> {
        sqlx::query_as::<_, ToolBudgetSummary>(
            "SELECT tool, total, borrowed, commit_qty, max_overage, \
                    commit_price, overage_price_per_license \
             FROM tool_budgets ORDER BY tool ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list budgets", e))
    }

    /// Provision seed tools. Existing rows are left untouched.
    ///
    /// Returns the number of newly created budgets.
    pub async fn seed(&self, tools: &[ResolvedSeedTool]) -> AppResult<u64> {
        let mut created = 0;
        for entry in tools {
            let result = sqlx::query(
                "INSERT OR IGNORE INTO tool_budgets \
                 (tool, total, borrowed, commit_qty, max_overage, commit_price, overage_price_per_license) \
                 VALUES (?, ?, 0, ?, ?, ?, ?)",
            )
            .bind(&entry.tool)
            .bind(entry.total)
            .bind(entry.commit_qty)
            .bind(entry.max_overage)
            .bind(entry.commit_price)
            .bind(entry.overage_price_per_license)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to seed budget", e))?;
            created += result.rows_affected();
        }
        Ok(created)
    }

    /// Record a vendor budget write: sets the vendor ceilings and resets
    /// the active limits to them.
    pub async fn set_vendor_budget(
        &self,
        tool: &str,
        total: i64,
        commit_qty: i64,
        max_overage: i64,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE tool_budgets SET \
                vendor_total = ?, vendor_commit_qty = ?, vendor_max_overage = ?, \
                total = ?, commit_qty = ?, max_overage = ? \
             WHERE tool = ?",
        )
        .bind(total)
        .bind(commit_qty)
        .bind(max_overage)
        .bind(total)
        .bind(commit_qty)
        .bind(max_overage)
        .bind(tool)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to set vendor budget", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Record a customer restriction: updates the active limits and the
    /// customer audit fields.
    pub async fn apply_customer_restriction(
        &self,
        tool: &str,
        total: i64,
        commit_qty: i64,
        max_overage: i64,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE tool_budgets SET \
                total = ?, commit_qty = ?, max_overage = ?, \
                customer_total = ?, customer_commit_qty = ?, customer_max_overage = ? \
             WHERE tool = ?",
        )
        .bind(total)
        .bind(commit_qty)
        .bind(max_overage)
        .bind(total)
        .bind(commit_qty)
        .bind(max_overage)
        .bind(tool)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to apply customer restriction", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Update commit and overage pricing for a tool.
    pub async fn update_pricing(
        &self,
        tool: &str,
        commit_price: f64,
        overage_price_per_license: f64,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE tool_budgets SET commit_price = ?, overage_price_per_license = ? \
             WHERE tool = ?",
        )
        .bind(commit_price)
        .bind(overage_price_per_license)
        .bind(tool)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update pricing", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Set (or clear) the monthly overage spend cap for a tool.
    pub async fn set_max_spend(&self, tool: &str, max_spend: Option<f64>) -> AppResult<bool> {
        let result = sqlx::query("UPDATE tool_budgets SET max_spend = ? WHERE tool = ?")
            .bind(max_spend)
            .bind(tool)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to set spend cap", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
