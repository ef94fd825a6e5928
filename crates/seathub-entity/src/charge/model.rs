//! Overage charge entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A permanent record of one overage borrow event.
///
/// Created exactly once per overage borrow, at borrow time. Never mutated
/// or deleted — this is the durable cost ledger, and it outlives the
/// borrow that triggered it. `amount` is copied from the per-license
/// price at charge time; later price changes do not alter it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OverageCharge {
    /// Unique charge identifier.
    pub id: Uuid,
    /// Tool the charge applies to.
    pub tool: String,
    /// The borrow that triggered the charge.
    pub borrow_id: Uuid,
    /// Requester identity.
    pub user: String,
    /// When the charge was recorded.
    pub charged_at: DateTime<Utc>,
    /// Amount charged for this single overage borrow.
    pub amount: f64,
}
