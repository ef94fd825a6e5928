//! Shared fixtures for engine unit tests.

use std::sync::Arc;

use seathub_core::config::DatabaseConfig;
use seathub_core::config::seed::ResolvedSeedTool;
use seathub_database::repositories::{BudgetRepository, LedgerRepository};
use seathub_database::{DatabasePool, migration};

use crate::admission::AdmissionEngine;
use crate::governance::BudgetGovernance;
use crate::locks::ToolLocks;
use crate::spend::SpendGuard;

/// A fully wired engine over a fresh in-memory database.
pub struct Harness {
    pub admission: AdmissionEngine,
    pub governance: BudgetGovernance,
    pub spend: Arc<SpendGuard>,
    pub budgets: Arc<BudgetRepository>,
    pub ledger: Arc<LedgerRepository>,
}

/// A seed entry with an explicit commit/overage split.
pub fn tool(
    name: &str,
    total: i64,
    commit_qty: i64,
    max_overage: i64,
    overage_price: f64,
) -> ResolvedSeedTool {
    ResolvedSeedTool {
        tool: name.to_string(),
        total,
        commit_qty,
        max_overage,
        commit_price: 1000.0,
        overage_price_per_license: overage_price,
    }
}

/// Open an in-memory database, migrate, seed, and wire the engine.
pub async fn harness(tools: &[ResolvedSeedTool]) -> Harness {
    let db = DatabasePool::connect(&DatabaseConfig::for_path(":memory:"))
        .await
        .expect("open database");
    migration::run_migrations(db.pool())
        .await
        .expect("run migrations");

    let budgets = Arc::new(BudgetRepository::new(db.pool().clone()));
    let ledger = Arc::new(LedgerRepository::new(db.pool().clone()));
    budgets.seed(tools).await.expect("seed tools");

    let locks = Arc::new(ToolLocks::new());
    let spend = Arc::new(SpendGuard::new(budgets.clone(), ledger.clone()));
    let admission = AdmissionEngine::new(
        budgets.clone(),
        ledger.clone(),
        spend.clone(),
        locks.clone(),
    );
    let governance = BudgetGovernance::new(budgets.clone(), locks);

    Harness {
        admission,
        governance,
        spend,
        budgets,
        ledger,
    }
}
