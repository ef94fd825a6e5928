//! # seathub
//!
//! Floating-license seat broker: a finite pool of seats per tool is
//! brokered across concurrent requesters under a two-tier capacity model
//! — a committed quantity (always grantable, pre-paid) and a bounded
//! overage allowance (pay-per-use), with per-borrow cost accounting,
//! monthly spend caps, and vendor/customer budget governance.
//!
//! This facade wires the member crates together for embedding by a
//! transport layer. The engine itself knows nothing about HTTP; a
//! collaborator resolves caller identity and calls the typed operations
//! on [`Broker`].

pub mod bootstrap;
pub mod telemetry;

pub use bootstrap::Broker;

pub use seathub_core::config::seed::{SeedConfig, SeedTool};
pub use seathub_core::config::{AppConfig, DatabaseConfig};
pub use seathub_core::error::{AppError, ErrorKind};
pub use seathub_core::result::AppResult;
pub use seathub_core::types::id::{BorrowId, ChargeId};
pub use seathub_engine::{AdmissionEngine, BorrowGrant, BudgetGovernance, SpendGuard};
pub use seathub_entity::borrow::BorrowRecord;
pub use seathub_entity::budget::{ToolBudget, ToolBudgetSummary, ToolStatus};
pub use seathub_entity::charge::OverageCharge;
