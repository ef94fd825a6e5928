//! Application wiring: configuration to a running broker.
//!
//! The store handle is constructed once here and injected into the
//! engine — there is no process-wide singleton. Migrations run before
//! any engine is handed out, and seeding never overwrites existing
//! budgets.

use std::sync::Arc;

use seathub_core::config::AppConfig;
use seathub_core::result::AppResult;
use seathub_database::repositories::{BudgetRepository, LedgerRepository};
use seathub_database::{DatabasePool, migration};
use seathub_engine::{AdmissionEngine, BudgetGovernance, SpendGuard, ToolLocks};

/// A fully wired seat broker: the admission engine plus its governance
/// and spend-guard collaborators, sharing one store handle and one
/// per-tool lock registry.
#[derive(Debug)]
pub struct Broker {
    /// Borrow/return/status operations.
    pub admission: AdmissionEngine,
    /// Vendor/customer budget edits.
    pub governance: BudgetGovernance,
    /// Month-to-date accounting and spend caps.
    pub spend: Arc<SpendGuard>,
    /// The underlying database pool (health checks, shutdown).
    pub db: DatabasePool,
}

impl Broker {
    /// Connect, migrate, seed, and wire the engine from configuration.
    pub async fn start(config: &AppConfig) -> AppResult<Self> {
        tracing::info!("Starting seathub v{}", env!("CARGO_PKG_VERSION"));

        let db = DatabasePool::connect(&config.database).await?;
        migration::run_migrations(db.pool()).await?;

        let budgets = Arc::new(BudgetRepository::new(db.pool().clone()));
        let ledger = Arc::new(LedgerRepository::new(db.pool().clone()));

        if !config.seed.tools.is_empty() {
            let resolved: Vec<_> = config.seed.tools.iter().map(|t| t.resolve()).collect();
            let created = budgets.seed(&resolved).await?;
            tracing::info!(created, "tool catalog seeded");
        }

        let locks = Arc::new(ToolLocks::new());
        let spend = Arc::new(SpendGuard::new(budgets.clone(), ledger.clone()));
        let admission = AdmissionEngine::new(
            budgets.clone(),
            ledger.clone(),
            spend.clone(),
            locks.clone(),
        );
        let governance = BudgetGovernance::new(budgets, locks);

        tracing::info!("Seat broker ready");
        Ok(Self {
            admission,
            governance,
            spend,
            db,
        })
    }

    /// Close the underlying store.
    pub async fn shutdown(&self) {
        self.db.close().await;
    }
}
