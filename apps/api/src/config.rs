use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};

use crate::llm_client::DEFAULT_BASE_URL;

/// Where records are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local, lost on restart.
    Memory,
    Postgres { database_url: String },
    Redis { redis_url: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BackendKind {
    Memory,
    Postgres,
    Redis,
}

impl FromStr for BackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(BackendKind::Memory),
            "postgres" => Ok(BackendKind::Postgres),
            "redis" => Ok(BackendKind::Redis),
            other => bail!("KV_BACKEND must be one of memory, postgres, redis (got '{other}')"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing. The provider key is
/// deliberately optional: its absence is reported per request.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_bearer_token: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub store_backend: StoreBackend,
    /// Mount point for every route, e.g. `/make-server-f5a18c95`. Empty = root.
    pub api_base_path: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| {
            var(key).ok_or_else(|| anyhow!("Required environment variable '{key}' is not set"))
        };

        let kind: BackendKind = var("KV_BACKEND")
            .unwrap_or_else(|| "memory".to_string())
            .parse()?;
        let store_backend = match kind {
            BackendKind::Memory => StoreBackend::Memory,
            BackendKind::Postgres => StoreBackend::Postgres {
                database_url: require("DATABASE_URL")?,
            },
            BackendKind::Redis => StoreBackend::Redis {
                redis_url: require("REDIS_URL")?,
            },
        };

        Ok(Config {
            api_bearer_token: require("API_BEARER_TOKEN")?,
            openai_api_key: var("OPENAI_API_KEY"),
            openai_base_url: var("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            store_backend,
            api_base_path: var("API_BASE_PATH").unwrap_or_default(),
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
