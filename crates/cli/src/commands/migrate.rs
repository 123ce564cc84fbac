//! Database migration command.
//!
//! Runs the same embedded migrations the server applies on startup, for
//! preparing a database ahead of time or migrating one the server is not
//! currently pointed at.

use glueledger_server::config::AppConfig;
use glueledger_server::db;

/// Run the embedded migrations against the configured database.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the database is
/// unreachable, or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;

    tracing::info!("Running migrations...");
    db::MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
