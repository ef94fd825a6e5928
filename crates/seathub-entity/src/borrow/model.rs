//! Borrow record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A record of one actively held seat.
///
/// Created atomically with the budget's seat-count increment; deleted
/// (and the count decremented) on return. There is no TTL — a borrow is
/// held until explicitly returned.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BorrowRecord {
    /// Unique borrow identifier.
    pub id: Uuid,
    /// Tool the seat belongs to.
    pub tool: String,
    /// Requester identity.
    pub user: String,
    /// When the seat was borrowed (authoritative instant).
    pub borrowed_at: DateTime<Utc>,
    /// Whether this borrow landed in the overage tier.
    /// Fixed at creation time, never recomputed.
    pub is_overage: bool,
}
