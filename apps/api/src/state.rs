use std::sync::Arc;

use crate::auth::Authenticator;
use crate::llm_client::CompletionProvider;
use crate::store::KeyValueStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data; all cross-request state lives in the store.
#[derive(Clone)]
pub struct AppState {
    /// Constructed once at startup; never re-initialised.
    pub store: Arc<dyn KeyValueStore>,
    /// Production: `LlmClient`. Tests swap in a scripted provider.
    pub llm: Arc<dyn CompletionProvider>,
    pub authenticator: Arc<dyn Authenticator>,
}
