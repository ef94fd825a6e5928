//! # seathub-engine
//!
//! The license admission and accounting engine: decides whether a borrow
//! request is granted, whether it counts against commit or overage,
//! whether a spend cap blocks it, and keeps every budget mutation inside
//! the per-tool critical section.

pub mod admission;
pub mod governance;
pub mod locks;
pub mod spend;

pub use admission::{AdmissionEngine, BorrowGrant};
pub use governance::BudgetGovernance;
pub use locks::ToolLocks;
pub use spend::SpendGuard;

#[cfg(test)]
mod test_support;
