//! Tool budget entities.

pub mod model;
pub mod status;
pub mod summary;

pub use model::ToolBudget;
pub use status::ToolStatus;
pub use summary::ToolBudgetSummary;
