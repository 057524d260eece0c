//! Keyed store trait

use crate::error::StoreResult;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// One record as the store sees it: a JSON object
pub type Item = Map<String, Value>;

/// Capability set of the managed key-value store
///
/// This trait abstracts the four store operations so the record layer can
/// run against DynamoDB in production and a local store everywhere else.
/// Implementations provide per-key atomicity for each call and nothing more.
#[async_trait]
pub trait KeyedStore: Send + Sync {
    /// Fetch the item stored under `key`, `None` if there is none
    async fn get_by_key(&self, key: &str) -> StoreResult<Option<Item>>;

    /// Store `item` under the value of its key attribute, replacing any
    /// previous item with that key
    async fn put_item(&self, item: Item) -> StoreResult<()>;

    /// Read every item in the store
    async fn scan(&self) -> StoreResult<Vec<Item>>;

    /// Remove the item stored under `key`; absent keys are not an error
    async fn delete_by_key(&self, key: &str) -> StoreResult<()>;
}

/// Read the string key out of `item`
///
/// Shared by adapters that index items by their key attribute.
pub fn item_key<'a>(item: &'a Item, key_attribute: &str) -> Option<&'a str> {
    item.get(key_attribute).and_then(Value::as_str)
}
