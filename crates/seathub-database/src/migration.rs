//! Database migration runner.
//!
//! Migrations are embedded at compile time and run exactly once at
//! startup, before the engine accepts traffic. Request paths never touch
//! the schema.

use sqlx::SqlitePool;
use tracing::info;

use seathub_core::error::{AppError, ErrorKind};

/// Run all pending database migrations.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    info!("Running database migrations...");

    sqlx::migrate!("./migrations").run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!("Database migrations completed successfully");
    Ok(())
}
