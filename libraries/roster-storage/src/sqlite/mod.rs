//! `SQLite` keyed store
//!
//! Items live in the `user_records` table as JSON text next to their key.
//! Run [`crate::run_migrations`] on the pool before use.

use async_trait::async_trait;
use roster_core::{storage::item_key, Item, KeyedStore, StoreError, StoreResult};
use sqlx::SqlitePool;

/// Keyed store backed by a `SQLite` table
pub struct SqliteStore {
    pool: SqlitePool,
    key_attribute: String,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool, key_attribute: impl Into<String>) -> Self {
        Self {
            pool,
            key_attribute: key_attribute.into(),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn decode(text: &str) -> StoreResult<Item> {
    Ok(serde_json::from_str(text)?)
}

#[async_trait]
impl KeyedStore for SqliteStore {
    async fn get_by_key(&self, key: &str) -> StoreResult<Option<Item>> {
        let text = sqlx::query_scalar::<_, String>("SELECT item FROM user_records WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        text.as_deref().map(decode).transpose()
    }

    async fn put_item(&self, item: Item) -> StoreResult<()> {
        let key = item_key(&item, &self.key_attribute)
            .ok_or_else(|| StoreError::MissingKey(self.key_attribute.clone()))?
            .to_owned();
        let text = serde_json::to_string(&item)?;

        sqlx::query(
            "INSERT INTO user_records (key, item) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET item = excluded.item",
        )
        .bind(key)
        .bind(text)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn scan(&self) -> StoreResult<Vec<Item>> {
        let rows = sqlx::query_scalar::<_, String>("SELECT item FROM user_records ORDER BY key")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(|text| decode(text)).collect()
    }

    async fn delete_by_key(&self, key: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM user_records WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
