//! Repository implementations for the Seathub entities.

pub mod budget;
pub mod ledger;

pub use budget::BudgetRepository;
pub use ledger::LedgerRepository;
