pub mod health;

use std::time::Duration;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::require_auth;
use crate::coaching::handlers as coaching;
use crate::journal::handlers as journal;
use crate::reflection::handlers as reflection;
use crate::schedule::handlers as schedule;
use crate::state::AppState;

/// Builds the full router. Every route requires authentication; CORS
/// preflights are answered before authentication runs.
pub fn build_router(state: AppState, base_path: &str) -> Router {
    let routes = Router::new()
        .route("/health", get(health::health_handler))
        .route("/generate-schedule", post(schedule::handle_generate_schedule))
        .route("/schedule/:user_id", get(schedule::handle_get_schedule))
        .route("/get-tip", post(coaching::handle_get_tip))
        .route("/chat", post(reflection::handle_chat))
        .route("/log-entry", post(journal::handle_log_entry))
        .route("/analytics/:user_id", get(journal::handle_analytics))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    let app = match normalize_base_path(base_path) {
        Some(path) => Router::new().nest(&path, routes),
        None => routes,
    };

    app.layer(TraceLayer::new_for_http()).layer(cors_layer())
}

/// Any origin; GET/POST/PUT/DELETE/OPTIONS; preflight cached for 10 minutes.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .expose_headers([CONTENT_LENGTH])
        .max_age(Duration::from_secs(600))
}

/// `"make-server/"` → `Some("/make-server")`; empty or `/` → `None`.
fn normalize_base_path(base_path: &str) -> Option<String> {
    let trimmed = base_path.trim().trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("/{trimmed}"))
    }
}
