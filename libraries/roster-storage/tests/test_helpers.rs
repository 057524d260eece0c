//! Test helpers and fixtures for storage integration tests
//!
//! SQLite-backed helpers use REAL database files (NOT in-memory) so the
//! migrations and the upsert statement run exactly as in production.

#![allow(dead_code)]

use roster_core::User;
use roster_storage::{MemoryStore, SqliteStore, UserRecords};
use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = roster_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        roster_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Store over this database, keyed by email
    pub fn store(&self) -> SqliteStore {
        SqliteStore::new(self.pool.clone(), User::KEY_ATTRIBUTE)
    }
}

/// Record layer over a fresh in-memory store
pub fn memory_records() -> (UserRecords, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new(User::KEY_ATTRIBUTE));
    (UserRecords::new(store.clone()), store)
}

/// Test fixture: JSON body for a user with a display name
pub fn user_body(email: &str, name: &str) -> String {
    serde_json::json!({ "email": email, "name": name }).to_string()
}
