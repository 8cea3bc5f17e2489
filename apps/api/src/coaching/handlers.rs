use axum::{extract::State, Json};
use serde::Serialize;

use crate::coaching::tip::{get_tip, TipRequest};
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TipResponse {
    pub tip: String,
}

/// POST /get-tip
pub async fn handle_get_tip(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TipRequest>,
) -> Result<Json<TipResponse>, AppError> {
    let tip = get_tip(state.llm.as_ref(), &request)
        .await
        .map_err(|e| e.with_provider_context("Failed to generate tip"))?;
    Ok(Json(TipResponse { tip }))
}
