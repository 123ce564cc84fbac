//! Database operations for the ledger (`SQLite` via sqlx).
//!
//! # Tables
//!
//! - `batches` - production runs with server-assigned sequential numbers
//! - `customers` - buyers
//! - `sales` - append-only sale records with stored totals
//! - `returns` - append-only returns with stored refunds
//! - `chemical_inventory` - purchases with mutable remaining stock
//! - `monthly_costs` / `latex_transport` / `batch_costs` - cost allocation
//! - `company_settings` - singleton invoice-header profile
//!
//! # Migrations
//!
//! Migrations live in `crates/server/migrations/` and run on server startup
//! or via `glueledger-cli migrate`.
//!
//! Multi-statement writes (batch creation with inventory decrement, cost
//! persistence, restore) each run in a single transaction and roll back
//! wholly on any failure.

pub mod analytics;
pub mod backup;
pub mod batches;
pub mod chemicals;
pub mod costs;
pub mod customers;
pub mod returns;
pub mod sales;
pub mod settings;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;

pub use analytics::AnalyticsRepository;
pub use backup::BackupRepository;
pub use batches::BatchRepository;
pub use chemicals::ChemicalRepository;
pub use costs::CostRepository;
pub use customers::CustomerRepository;
pub use returns::ReturnRepository;
pub use sales::SaleRepository;
pub use settings::SettingsRepository;

/// Embedded migrations, shared with the CLI.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g. protected delete).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// The database file is created if missing and foreign keys are enforced.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be
/// established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);

    SqlitePoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}
