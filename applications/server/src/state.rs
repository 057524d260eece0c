/// Shared application state
use crate::config::{StorageBackend, StorageSettings};
use crate::error::Result;
use roster_core::{KeyedStore, StoreError, User};
use roster_storage::{DynamoStore, MemoryStore, SqliteStore, UserRecords};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub records: UserRecords,
    /// Backend behind `records`, reported by the health check
    pub backend: StorageBackend,
}

impl AppState {
    pub fn new(records: UserRecords, backend: StorageBackend) -> Self {
        Self { records, backend }
    }

    /// Connect the configured backend and wrap it in the record layer
    pub async fn from_settings(storage: &StorageSettings) -> Result<Self> {
        let store = open_store(storage).await?;
        Ok(Self::new(UserRecords::new(store), storage.backend))
    }
}

async fn open_store(storage: &StorageSettings) -> Result<Arc<dyn KeyedStore>> {
    let store: Arc<dyn KeyedStore> = match storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory store, records are lost on exit");
            Arc::new(MemoryStore::new(User::KEY_ATTRIBUTE))
        }
        StorageBackend::Sqlite => {
            let pool = roster_storage::create_pool(&storage.database_url)
                .await
                .map_err(StoreError::from)?;
            roster_storage::run_migrations(&pool)
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;
            tracing::info!("Database connected");
            Arc::new(SqliteStore::new(pool, User::KEY_ATTRIBUTE))
        }
        StorageBackend::DynamoDb => {
            let store = DynamoStore::from_env(&storage.table_name, User::KEY_ATTRIBUTE).await;
            tracing::info!("Using DynamoDB table {}", store.table_name());
            Arc::new(store)
        }
    };

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_backend_starts_empty() {
        let storage = StorageSettings {
            backend: StorageBackend::Memory,
            ..StorageSettings::default()
        };

        let state = AppState::from_settings(&storage).await.unwrap();
        assert_eq!(state.backend, StorageBackend::Memory);
        assert!(state.records.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sqlite_backend_runs_migrations() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageSettings {
            backend: StorageBackend::Sqlite,
            database_url: format!("sqlite://{}", dir.path().join("roster.db").display()),
            ..StorageSettings::default()
        };

        let state = AppState::from_settings(&storage).await.unwrap();
        state
            .records
            .create(r#"{"email":"a@b.com"}"#)
            .await
            .unwrap();
        assert_eq!(state.records.fetch_all().await.unwrap().len(), 1);
    }
}
