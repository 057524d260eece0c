//! Roster Storage
//!
//! Record access for Roster users plus the keyed store adapters it runs on.
//!
//! # Architecture
//!
//! - **Record Access Layer**: [`users::UserRecords`] maps fetch/create/update/delete
//!   onto any [`KeyedStore`](roster_core::KeyedStore) and enforces the
//!   existence and uniqueness rules
//! - **Adapters**: one vertical slice per backend
//!   - [`memory`]: process-local map, for tests and local runs
//!   - [`sqlite`]: `SQLite` file through `sqlx`, for persistent local runs
//!   - [`dynamodb`]: the managed table used in production
//!
//! # Example
//!
//! ```rust,no_run
//! use roster_storage::{create_pool, run_migrations, sqlite::SqliteStore, users::UserRecords};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://roster.db").await?;
//! run_migrations(&pool).await?;
//!
//! let records = UserRecords::new(Arc::new(SqliteStore::new(pool, "email")));
//! let _user = records.create(r#"{"email":"ada@example.com"}"#).await?;
//! # Ok(())
//! # }
//! ```

pub mod dynamodb;
pub mod memory;
pub mod sqlite;
pub mod users;

pub use dynamodb::DynamoStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use users::UserRecords;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Call once on startup before handing the pool to a [`SqliteStore`].
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://roster.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "creating sqlite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!(database_url, "sqlite pool ready");

    Ok(pool)
}
