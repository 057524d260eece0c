//! In-process keyed store
//!
//! Holds items in a sorted map behind an async lock. State lives only as
//! long as the store value, so this backend suits tests and throwaway local
//! runs.

use async_trait::async_trait;
use roster_core::{storage::item_key, Item, KeyedStore, StoreError, StoreResult};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Keyed store backed by a `BTreeMap`
pub struct MemoryStore {
    key_attribute: String,
    items: RwLock<BTreeMap<String, Item>>,
}

impl MemoryStore {
    pub fn new(key_attribute: impl Into<String>) -> Self {
        Self {
            key_attribute: key_attribute.into(),
            items: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of stored items
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// True when no items are stored
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl KeyedStore for MemoryStore {
    async fn get_by_key(&self, key: &str) -> StoreResult<Option<Item>> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn put_item(&self, item: Item) -> StoreResult<()> {
        let key = item_key(&item, &self.key_attribute)
            .ok_or_else(|| StoreError::MissingKey(self.key_attribute.clone()))?
            .to_owned();
        self.items.write().await.insert(key, item);
        Ok(())
    }

    async fn scan(&self) -> StoreResult<Vec<Item>> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn delete_by_key(&self, key: &str) -> StoreResult<()> {
        self.items.write().await.remove(key);
        Ok(())
    }
}
