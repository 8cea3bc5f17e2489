//! Key-value persistence.
//!
//! Every record the service owns lives in one flat namespace of
//! colon-delimited keys (see [`keys`]). Backends implement [`KeyValueStore`];
//! the handle is built once at startup and injected through `AppState`.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub mod keys;
pub mod memory;
pub mod postgres;
pub mod redis_kv;

pub use memory::InMemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend unreachable: {0}")]
    Unavailable(String),

    #[error("stored value is not valid JSON: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

impl From<::redis::RedisError> for StoreError {
    fn from(err: ::redis::RedisError) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Namespaced JSON storage with last-write-wins semantics.
///
/// A single `set` must be atomic: readers see the old value or the new one,
/// never a partial write. Nothing is retried on failure.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Upserts `value` under `key`.
    async fn set(&self, key: &str, value: &Value) -> Result<(), StoreError>;

    /// Returns every value whose key starts with `prefix`. Order is unspecified.
    async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<Value>, StoreError>;
}
