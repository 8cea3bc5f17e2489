//! Schedule generation — validate → prompt → generate → parse → persist.
//!
//! The provider decides ordering and time-boxing entirely; this module only
//! enforces that what comes back is a non-empty JSON array of schedule items.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::{fill, JSON_ARRAY_ONLY_INSTRUCTION};
use crate::llm_client::{strip_code_fences, CompletionOptions, CompletionProvider};
use crate::models::chat::ChatTurn;
use crate::models::schedule::{ScheduleItem, ScheduleRecord};
use crate::schedule::prompts::{SCHEDULE_PROMPT_TEMPLATE, SCHEDULE_TEMPERATURE};
use crate::store::keys::{iso_timestamp, schedule_key};
use crate::store::{KeyValueStore, StoreError};
use crate::validation::{
    require_non_empty, validate_available_hours, validate_scale, validate_user_id,
};

/// Request body for POST /generate-schedule.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub mood: i64,
    pub energy: i64,
    pub goals: String,
    pub available_hours: f64,
    pub user_id: String,
}

/// Generates today's schedule for a user and stores it, replacing any
/// schedule already generated today.
pub async fn generate_schedule(
    store: &dyn KeyValueStore,
    llm: &dyn CompletionProvider,
    request: &ScheduleRequest,
    now: DateTime<Utc>,
) -> Result<Vec<ScheduleItem>, AppError> {
    let user_id = validate_user_id(&request.user_id)?;
    let mood = validate_scale("mood", request.mood)?;
    let energy = validate_scale("energy", request.energy)?;
    let goals = require_non_empty("goals", &request.goals)?;
    let available_hours = validate_available_hours(request.available_hours)?;

    let prompt = build_schedule_prompt(mood, energy, goals, available_hours);
    let raw = llm
        .complete(
            &[ChatTurn::user(prompt)],
            CompletionOptions {
                temperature: SCHEDULE_TEMPERATURE,
                max_tokens: None,
            },
        )
        .await?;

    let schedule = parse_schedule(&raw)?;

    let record = ScheduleRecord {
        schedule: schedule.clone(),
        mood,
        energy,
        goals: goals.to_string(),
        available_hours,
        timestamp: iso_timestamp(now),
    };
    let key = schedule_key(user_id, now);
    let value = serde_json::to_value(&record).map_err(StoreError::from)?;
    store.set(&key, &value).await?;

    info!(
        "Stored {} schedule items under {key}",
        record.schedule.len()
    );
    Ok(schedule)
}

/// Returns the schedule generated today for `user_id`, if any.
pub async fn todays_schedule(
    store: &dyn KeyValueStore,
    user_id: &str,
    now: DateTime<Utc>,
) -> Result<Option<ScheduleRecord>, AppError> {
    let user_id = validate_user_id(user_id)?;
    let Some(value) = store.get(&schedule_key(user_id, now)).await? else {
        return Ok(None);
    };
    let record = serde_json::from_value(value).map_err(StoreError::from)?;
    Ok(Some(record))
}

pub fn build_schedule_prompt(mood: u8, energy: u8, goals: &str, available_hours: f64) -> String {
    fill(
        SCHEDULE_PROMPT_TEMPLATE,
        &[
            ("json_instruction", JSON_ARRAY_ONLY_INSTRUCTION),
            ("mood", &mood.to_string()),
            ("energy", &energy.to_string()),
            ("available_hours", &available_hours.to_string()),
            ("goals", goals),
        ],
    )
}

/// Parses provider output into schedule items, tolerating code fences the
/// model adds despite instructions.
pub fn parse_schedule(raw: &str) -> Result<Vec<ScheduleItem>, AppError> {
    let cleaned = strip_code_fences(raw);
    let schedule: Vec<ScheduleItem> = serde_json::from_str(cleaned).map_err(|e| {
        warn!("Unparseable schedule response: {e}; raw response: {raw}");
        AppError::GenerationParse(e.to_string())
    })?;
    if schedule.is_empty() {
        warn!("Provider returned an empty schedule");
        return Err(AppError::GenerationParse(
            "schedule contained no items".to_string(),
        ));
    }
    Ok(schedule)
}
