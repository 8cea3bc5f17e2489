use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::auth::Principal;
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::journal::analytics::get_logs;
use crate::journal::log::{record_log, LogRequest};
use crate::models::journal::LogEntry;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LogEntryResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub logs: Vec<LogEntry>,
}

/// POST /log-entry
pub async fn handle_log_entry(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiJson(request): ApiJson<LogRequest>,
) -> Result<Json<LogEntryResponse>, AppError> {
    principal.authorize_user(&request.user_id)?;
    record_log(state.store.as_ref(), &request, Utc::now()).await?;
    Ok(Json(LogEntryResponse { success: true }))
}

/// GET /analytics/:userId
///
/// Up to 50 most recent entries, newest first.
pub async fn handle_analytics(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(user_id): Path<String>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    principal.authorize_user(&user_id)?;
    let logs = get_logs(state.store.as_ref(), &user_id).await?;
    Ok(Json(AnalyticsResponse { logs }))
}
