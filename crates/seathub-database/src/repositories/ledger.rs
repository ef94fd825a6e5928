//! Seat ledger repository implementation.
//!
//! Holds the active borrow records and the permanent overage charge
//! ledger. The two mutation paths (`commit_borrow`, `commit_return`) are
//! single SQL transactions: either every side effect of an admission
//! persists, or none do. Serialization of decision-making is the engine's
//! job; the ledger only guarantees all-or-nothing writes.

use sqlx::SqlitePool;
use uuid::Uuid;

use seathub_core::error::{AppError, ErrorKind};
use seathub_core::result::AppResult;
use seathub_entity::borrow::BorrowRecord;
use seathub_entity::charge::OverageCharge;

/// Repository for borrow records and overage charges.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    pool: SqlitePool,
}

impl LedgerRepository {
    /// Create a new ledger repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a granted borrow: seat-count increment, borrow record, and
    /// the overage charge (if any), in one transaction.
    pub async fn commit_borrow(
        &self,
        record: &BorrowRecord,
        charge: Option<&OverageCharge>,
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(tx_err)?;

        let updated = sqlx::query("UPDATE tool_budgets SET borrowed = borrowed + 1 WHERE tool = ?")
            .bind(&record.tool)
            .execute(&mut *tx)
            .await
            .map_err(tx_err)?;
        if updated.rows_affected() != 1 {
            return Err(AppError::database(format!(
                "budget row vanished for tool {}",
                record.tool
            )));
        }

        sqlx::query(
            "INSERT INTO borrows (id, tool, user, borrowed_at, is_overage) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(record.id)
        .bind(&record.tool)
        .bind(&record.user)
        .bind(record.borrowed_at)
        .bind(record.is_overage)
        .execute(&mut *tx)
        .await
        .map_err(tx_err)?;

        if let Some(charge) = charge {
            sqlx::query(
                "INSERT INTO overage_charges (id, tool, borrow_id, user, charged_at, amount) \
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(charge.id)
            .bind(&charge.tool)
            .bind(charge.borrow_id)
            .bind(&charge.user)
            .bind(charge.charged_at)
            .bind(charge.amount)
            .execute(&mut *tx)
            .await
            .map_err(tx_err)?;
        }

        tx.commit().await.map_err(tx_err)
    }

    /// Remove a borrow record and decrement its tool's seat count, in one
    /// transaction. Returns the tool name, or `None` if the record does
    /// not exist (already returned).
    pub async fn commit_return(&self, borrow_id: Uuid) -> AppResult<Option<String>> {
        let mut tx = self.pool.begin().await.map_err(tx_err)?;

        // Deleting first (with RETURNING) keeps the transaction
        // write-locked from its opening statement.
        let tool: Option<String> =
            sqlx::query_scalar("DELETE FROM borrows WHERE id = ? RETURNING tool")
                .bind(borrow_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(tx_err)?;
        let Some(tool) = tool else {
            return Ok(None);
        };

        sqlx::query("UPDATE tool_budgets SET borrowed = borrowed - 1 WHERE tool = ?")
            .bind(&tool)
            .execute(&mut *tx)
            .await
            .map_err(tx_err)?;

        tx.commit().await.map_err(tx_err)?;
        Ok(Some(tool))
    }

    /// Find a borrow record by id.
    pub async fn find_borrow(&self, borrow_id: Uuid) -> AppResult<Option<BorrowRecord>> {
        sqlx::query_as::<_, BorrowRecord>("SELECT * FROM borrows WHERE id = ?")
            .bind(borrow_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find borrow", e))
    }

    /// List active borrow records, newest first, optionally filtered by
    /// requester.
    pub async fn list_borrows(&self, user: Option<&str>) -> AppResult<Vec<BorrowRecord>> {
        let query = match user {
            Some(user) => sqlx::query_as::<_, BorrowRecord>(
                "SELECT * FROM borrows WHERE user = ? ORDER BY borrowed_at DESC",
            )
            .bind(user),
            None => {
                sqlx::query_as::<_, BorrowRecord>("SELECT * FROM borrows ORDER BY borrowed_at DESC")
            }
        };
        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list borrows", e))
    }

    /// Count active borrow records for a tool.
    pub async fn count_active_borrows(&self, tool: &str) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM borrows WHERE tool = ?")
            .bind(tool)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count borrows", e))
    }

    /// Count all overage charges ever recorded for a tool.
    pub async fn count_charges(&self, tool: &str) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM overage_charges WHERE tool = ?")
            .bind(tool)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count charges", e))
    }

    /// List overage charges, newest first, optionally filtered by tool.
    pub async fn list_charges(&self, tool: Option<&str>) -> AppResult<Vec<OverageCharge>> {
        let query = match tool {
            Some(tool) => sqlx::query_as::<_, OverageCharge>(
                "SELECT * FROM overage_charges WHERE tool = ? ORDER BY charged_at DESC",
            )
            .bind(tool),
            None => sqlx::query_as::<_, OverageCharge>(
                "SELECT * FROM overage_charges ORDER BY charged_at DESC",
            ),
        };
        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list charges", e))
    }
}

fn tx_err(e: sqlx::Error) -> AppError {
    AppError::with_source(ErrorKind::Database, "Ledger transaction failed", e)
}
