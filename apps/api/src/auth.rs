//! Request authentication.
//!
//! The router runs every request through [`require_auth`], which asks the
//! configured [`Authenticator`] for a [`Principal`] and stores it in the
//! request extensions. Handlers only ever see an authenticated principal and
//! check it against the user id they are about to act for.

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::errors::AppError;
use crate::state::AppState;

/// Who a request was authenticated as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// Holder of the shared service token; may act for any user id.
    Service,
    /// A single end user; may only act for their own id.
    #[allow(dead_code)] // issued by per-user authenticators
    User(String),
}

impl Principal {
    pub fn authorize_user(&self, user_id: &str) -> Result<(), AppError> {
        match self {
            Principal::Service => Ok(()),
            Principal::User(own) if own == user_id.trim() => Ok(()),
            Principal::User(_) => Err(AppError::Forbidden(format!(
                "not allowed to act for user {user_id}"
            ))),
        }
    }
}

/// Pluggable authentication strategy. Carried in `AppState` as
/// `Arc<dyn Authenticator>`.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, headers: &HeaderMap) -> Result<Principal, AppError>;
}

/// Accepts exactly one shared bearer token.
pub struct SharedTokenAuthenticator {
    token: String,
}

impl SharedTokenAuthenticator {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl Authenticator for SharedTokenAuthenticator {
    async fn authenticate(&self, headers: &HeaderMap) -> Result<Principal, AppError> {
        let provided = bearer_token(headers).ok_or(AppError::Unauthorized)?;
        if provided != self.token {
            return Err(AppError::Unauthorized);
        }
        Ok(Principal::Service)
    }
}

/// Extracts `<token>` from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Middleware gating every route behind the configured authenticator.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let principal = state.authenticator.authenticate(request.headers()).await?;
    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}
