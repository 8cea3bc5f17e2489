use tracing::warn;

use crate::errors::AppError;
use crate::models::journal::LogEntry;
use crate::store::keys::log_prefix;
use crate::store::KeyValueStore;
use crate::validation::validate_user_id;

/// Maximum number of entries returned by the analytics endpoint.
pub const ANALYTICS_LIMIT: usize = 50;

/// Returns the user's most recent log entries, newest first.
/// Aggregation (averages, totals) is left to the client.
pub async fn get_logs(store: &dyn KeyValueStore, user_id: &str) -> Result<Vec<LogEntry>, AppError> {
    let user_id = validate_user_id(user_id)?;
    let values = store.get_by_prefix(&log_prefix(user_id)).await?;

    let mut logs: Vec<LogEntry> = values
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping malformed log entry for {user_id}: {e}");
                None
            }
        })
        .collect();

    // Timestamps are fixed-width ISO-8601, so string order is time order.
    logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    logs.truncate(ANALYTICS_LIMIT);
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::log::{record_log, LogRequest};
    use crate::store::InMemoryStore;
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::json;

    fn request(user_id: &str, mood: i64) -> LogRequest {
        LogRequest {
            user_id: user_id.to_string(),
            mood,
            energy: 5,
            notes: Some(String::new()),
            completed_tasks: Some(0),
        }
    }

    #[tokio::test]
    async fn test_logs_are_newest_first_and_capped() {
        let store = InMemoryStore::new();
        let start = Utc.with_ymd_and_hms(2026, 9, 1, 9, 0, 0).unwrap();
        // Write out of order so the store's own ordering cannot help.
        for i in (0..60).rev() {
            let at = start + Duration::hours(i * 7);
            record_log(&store, &request("u1", i % 11), at).await.unwrap();
        }

        let logs = get_logs(&store, "u1").await.unwrap();
        assert_eq!(logs.len(), ANALYTICS_LIMIT);
        assert!(logs.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
        let newest = crate::store::keys::iso_timestamp(start + Duration::hours(59 * 7));
        assert_eq!(logs[0].timestamp, newest);
    }

    #[tokio::test]
    async fn test_logs_are_scoped_to_user() {
        let store = InMemoryStore::new();
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        record_log(&store, &request("u1", 3), now).await.unwrap();
        record_log(&store, &request("u10", 9), now).await.unwrap();

        let logs = get_logs(&store, "u1").await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].mood, 3);
    }

    #[tokio::test]
    async fn test_unknown_user_has_no_logs() {
        let store = InMemoryStore::new();
        assert!(get_logs(&store, "nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_entries_are_skipped() {
        let store = InMemoryStore::new();
        store.set("log:u1:garbage", &json!({"mood": "high"})).await.unwrap();
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        record_log(&store, &request("u1", 4), now).await.unwrap();

        let logs = get_logs(&store, "u1").await.unwrap();
        assert_eq!(logs.len(), 1);
    }
}
