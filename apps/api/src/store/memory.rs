use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{KeyValueStore, StoreError};

/// Process-local store. Used by tests and as the zero-config backend;
/// contents are lost on restart.
#[derive(Default)]
pub struct InMemoryStore {
    entries: RwLock<BTreeMap<String, Value>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl InMemoryStore {
    /// Number of keys currently held.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// All keys starting with `prefix`, in key order.
    pub async fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.entries
            .read()
            .await
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<Value>, StoreError> {
        Ok(self
            .entries
            .read()
            .await
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(_, v)| v.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_missing_key_is_none() {
        let store = InMemoryStore::new();
        assert!(store.get("schedule:u1:2026-01-01").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_overwrites_last_write_wins() {
        let store = InMemoryStore::new();
        store.set("k", &json!({"v": 1})).await.unwrap();
        store.set("k", &json!({"v": 2})).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(json!({"v": 2})));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_prefix_scan_only_returns_matching_keys() {
        let store = InMemoryStore::new();
        store.set("log:u1:a", &json!(1)).await.unwrap();
        store.set("log:u1:b", &json!(2)).await.unwrap();
        store.set("log:u10:a", &json!(3)).await.unwrap();
        store.set("schedule:u1:a", &json!(4)).await.unwrap();

        let mut values = store.get_by_prefix("log:u1:").await.unwrap();
        values.sort_by_key(|v| v.as_i64());
        assert_eq!(values, vec![json!(1), json!(2)]);
        assert_eq!(
            store.keys_with_prefix("log:u1").await,
            vec!["log:u10:a", "log:u1:a", "log:u1:b"]
        );
    }
}
