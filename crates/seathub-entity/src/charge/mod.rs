//! Overage charge entities.

pub mod model;

pub use model::OverageCharge;
