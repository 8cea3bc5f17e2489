use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::models::journal::LogEntry;
use crate::store::keys::{iso_timestamp, log_key};
use crate::store::{KeyValueStore, StoreError};
use crate::validation::{validate_completed_tasks, validate_scale, validate_user_id};

/// Request body for POST /log-entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRequest {
    pub user_id: String,
    pub mood: i64,
    pub energy: i64,
    /// Absent and `null` both mean "no notes".
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub completed_tasks: Option<i64>,
}

/// Stores one check-in under a fresh key. Never reads or merges existing
/// entries, so repeated calls always produce distinct records.
pub async fn record_log(
    store: &dyn KeyValueStore,
    request: &LogRequest,
    now: DateTime<Utc>,
) -> Result<LogEntry, AppError> {
    let user_id = validate_user_id(&request.user_id)?;
    let entry = LogEntry {
        mood: validate_scale("mood", request.mood)?,
        energy: validate_scale("energy", request.energy)?,
        notes: request.notes.clone().unwrap_or_default(),
        completed_tasks: validate_completed_tasks(request.completed_tasks.unwrap_or_default())?,
        timestamp: iso_timestamp(now),
    };

    let key = log_key(user_id, now);
    let value = serde_json::to_value(&entry).map_err(StoreError::from)?;
    store.set(&key, &value).await?;
    debug!("Stored log entry {key}");

    Ok(entry)
}
