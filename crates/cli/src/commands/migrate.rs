//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! shopkart-cli migrate
//! ```
//!
//! Migration files live in `crates/server/migrations/` and are
//! embedded into the binary at compile time.

use super::CommandError;

/// Run catalog database migrations.
///
/// # Errors
///
/// Returns [`CommandError`] if the database is unreachable or a
/// migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = super::connect().await?;

    tracing::info!("Running catalog migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Catalog migrations complete");
    Ok(())
}
