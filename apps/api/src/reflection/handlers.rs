use axum::{extract::State, Extension, Json};
use chrono::Utc;
use serde::Serialize;

use crate::auth::Principal;
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::reflection::chat::{converse, ChatRequest};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiJson(request): ApiJson<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    principal.authorize_user(&request.user_id)?;
    let reply = converse(state.store.as_ref(), state.llm.as_ref(), &request, Utc::now())
        .await
        .map_err(|e| e.with_provider_context("Failed to get chat response"))?;
    Ok(Json(ChatResponse { reply }))
}
