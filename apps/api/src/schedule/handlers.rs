//! Axum route handlers for the Schedule API.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::auth::Principal;
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::models::schedule::{ScheduleItem, ScheduleRecord};
use crate::schedule::service::{generate_schedule, todays_schedule, ScheduleRequest};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateScheduleResponse {
    pub schedule: Vec<ScheduleItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayScheduleResponse {
    pub schedule_data: Option<ScheduleRecord>,
}

/// POST /generate-schedule
///
/// Generates and stores today's schedule, replacing any earlier one.
pub async fn handle_generate_schedule(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiJson(request): ApiJson<ScheduleRequest>,
) -> Result<Json<GenerateScheduleResponse>, AppError> {
    principal.authorize_user(&request.user_id)?;

    let schedule = generate_schedule(
        state.store.as_ref(),
        state.llm.as_ref(),
        &request,
        Utc::now(),
    )
    .await
    .map_err(|e| e.with_provider_context("Failed to generate schedule"))?;

    Ok(Json(GenerateScheduleResponse { schedule }))
}

/// GET /schedule/:userId
///
/// Returns today's stored schedule, or `null` when none was generated today.
pub async fn handle_get_schedule(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(user_id): Path<String>,
) -> Result<Json<TodayScheduleResponse>, AppError> {
    principal.authorize_user(&user_id)?;
    let schedule_data = todays_schedule(state.store.as_ref(), &user_id, Utc::now()).await?;
    Ok(Json(TodayScheduleResponse { schedule_data }))
}
