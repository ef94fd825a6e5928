//! Borrow record entities.

pub mod model;

pub use model::BorrowRecord;
