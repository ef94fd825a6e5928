//! Unified application error types for Seathub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Admission denials (exhausted pool,
//! overage ceiling, spend cap, ...) are ordinary error values with a
//! denial kind — they are expected, frequent outcomes, not faults.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested tool is not provisioned in the budget store.
    UnknownTool,
    /// Total seat capacity for the tool is reached.
    Exhausted,
    /// The overage ceiling for the tool is reached.
    MaxOverage,
    /// The monthly overage spend cap would be exceeded.
    SpendCap,
    /// The borrow record does not exist (or was already returned).
    NotFound,
    /// A budget edit violated a governance constraint.
    InvalidBudgetEdit,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
}

impl ErrorKind {
    /// Whether this kind is an expected admission/governance denial,
    /// as opposed to a storage or configuration fault.
    pub fn is_denial(self) -> bool {
        matches!(
            self,
            Self::UnknownTool
                | Self::Exhausted
                | Self::MaxOverage
                | Self::SpendCap
                | Self::NotFound
                | Self::InvalidBudgetEdit
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTool => write!(f, "UNKNOWN_TOOL"),
            Self::Exhausted => write!(f, "EXHAUSTED"),
            Self::MaxOverage => write!(f, "MAX_OVERAGE"),
            Self::SpendCap => write!(f, "SPEND_CAP_EXCEEDED"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::InvalidBudgetEdit => write!(f, "INVALID_BUDGET_EDIT"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
        }
    }
}

/// The unified application error used throughout Seathub.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether this error is an expected admission/governance denial.
    pub fn is_denial(&self) -> bool {
        self.kind.is_denial()
    }

    /// Create an unknown-tool denial.
    pub fn unknown_tool(tool: impl fmt::Display) -> Self {
        Self::new(ErrorKind::UnknownTool, format!("unknown tool: {tool}"))
    }

    /// Create an exhausted-capacity denial.
    pub fn exhausted(tool: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::Exhausted,
            format!("no seats available for {tool}"),
        )
    }

    /// Create an overage-ceiling denial.
    pub fn max_overage(tool: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::MaxOverage,
            format!("overage ceiling reached for {tool}"),
        )
    }

    /// Create a spend-cap denial.
    pub fn spend_cap(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SpendCap, message)
    }

    /// Create a not-found denial.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an invalid-budget-edit denial.
    pub fn invalid_budget_edit(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidBudgetEdit, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
