//! Startup tool catalog seeding configuration.

use serde::{Deserialize, Serialize};

/// Tool catalog seeding configuration.
///
/// Tools are provisioned once at startup; seeding never overwrites an
/// existing budget row, so repeated starts are harmless.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Tools to provision on startup.
    #[serde(default)]
    pub tools: Vec<SeedTool>,
}

/// One seeded tool budget entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedTool {
    /// Tool name (unique key).
    pub tool: String,
    /// Hard ceiling on concurrent borrows.
    pub total: i64,
    /// Seats always grantable without the overage flag.
    /// Defaults to 80% of `total` (minimum 1).
    pub commit_qty: Option<i64>,
    /// Maximum seats grantable beyond commit.
    /// Defaults to 20% of `total` (minimum 1).
    pub max_overage: Option<i64>,
    /// Flat recurring cost for the committed quantity.
    pub commit_price: Option<f64>,
    /// Cost charged per overage borrow event.
    pub overage_price_per_license: Option<f64>,
}

/// A seed entry with all defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSeedTool {
    /// Tool name (unique key).
    pub tool: String,
    /// Hard ceiling on concurrent borrows.
    pub total: i64,
    /// Seats always grantable without the overage flag.
    pub commit_qty: i64,
    /// Maximum seats grantable beyond commit.
    pub max_overage: i64,
    /// Flat recurring cost for the committed quantity.
    pub commit_price: f64,
    /// Cost charged per overage borrow event.
    pub overage_price_per_license: f64,
}

const DEFAULT_COMMIT_PRICE: f64 = 1000.0;
const DEFAULT_OVERAGE_PRICE: f64 = 100.0;

impl SeedTool {
    /// Apply the default commit/overage split and pricing.
    pub fn resolve(&self) -> ResolvedSeedTool {
        ResolvedSeedTool {
            tool: self.tool.clone(),
            total: self.total,
            commit_qty: self
                .commit_qty
                .unwrap_or_else(|| (self.total * 8 / 10).max(1)),
            max_overage: self
                .max_overage
                .unwrap_or_else(|| (self.total * 2 / 10).max(1)),
            commit_price: self.commit_price.unwrap_or(DEFAULT_COMMIT_PRICE),
            overage_price_per_license: self
                .overage_price_per_license
                .unwrap_or(DEFAULT_OVERAGE_PRICE),
        }
    }
}
