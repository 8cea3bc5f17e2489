mod auth;
mod coaching;
mod config;
mod errors;
mod extract;
mod journal;
mod llm_client;
mod models;
mod reflection;
mod routes;
mod schedule;
mod state;
mod store;
mod validation;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::SharedTokenAuthenticator;
use crate::config::{Config, StoreBackend};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::postgres::{create_pool, PgKvStore};
use crate::store::redis_kv::RedisKvStore;
use crate::store::{InMemoryStore, KeyValueStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_PKG_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Daypilot API v{}", env!("CARGO_PKG_VERSION"));

    let store = build_store(&config.store_backend).await?;

    // Initialize LLM client; a missing key is reported on each generation request
    let llm = LlmClient::new(config.openai_api_key.clone(), config.openai_base_url.clone());
    if llm.is_configured() {
        info!("LLM client initialized (model: {})", llm_client::MODEL);
    } else {
        warn!("OPENAI_API_KEY is not set; generation endpoints will return errors");
    }

    let state = AppState {
        store,
        llm: Arc::new(llm),
        authenticator: Arc::new(SharedTokenAuthenticator::new(
            config.api_bearer_token.clone(),
        )),
    };

    let app = build_router(state, &config.api_base_path);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs the configured store. Called once; the handle is shared by
/// every request for the life of the process.
async fn build_store(backend: &StoreBackend) -> Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match backend {
        StoreBackend::Memory => {
            warn!("Using in-memory store; records are lost on restart");
            Arc::new(InMemoryStore::new())
        }
        StoreBackend::Postgres { database_url } => {
            let pool = create_pool(database_url).await?;
            Arc::new(PgKvStore::init(pool).await?)
        }
        StoreBackend::Redis { redis_url } => Arc::new(RedisKvStore::connect(redis_url).await?),
    };
    Ok(store)
}
