use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use super::{KeyValueStore, StoreError};

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS kv_store (
    key        TEXT PRIMARY KEY,
    value      JSONB NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// PostgreSQL-backed store: one row per key in a single `kv_store` table.
pub struct PgKvStore {
    pool: PgPool,
}

impl PgKvStore {
    /// Wraps `pool` and makes sure the `kv_store` table exists.
    pub async fn init(pool: PgPool) -> Result<Self> {
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        info!("kv_store table ready");
        Ok(Self { pool })
    }
}

#[async_trait]
impl KeyValueStore for PgKvStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(
            sqlx::query_scalar::<_, Value>("SELECT value FROM kv_store WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn set(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_by_prefix(&self, prefix: &str) -> Result<Vec<Value>, StoreError> {
        Ok(
            sqlx::query_scalar::<_, Value>("SELECT value FROM kv_store WHERE starts_with(key, $1)")
                .bind(prefix)
                .fetch_all(&self.pool)
                .await?,
        )
    }
}
