//! # seathub-database
//!
//! SQLite database connection management, versioned migrations, and
//! concrete repository implementations for the Seathub entities.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
