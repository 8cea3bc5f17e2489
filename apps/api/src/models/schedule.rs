use serde::{Deserialize, Serialize};

/// A single slot of a generated day plan.
///
/// Only ever produced by parsing provider output. `duration` and `tip` are
/// tolerated as missing and default to empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub time: String,
    pub task: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub tip: String,
}

/// The persisted result of one successful schedule generation.
/// One per user per UTC calendar day; later generations overwrite it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    pub schedule: Vec<ScheduleItem>,
    pub mood: u8,
    pub energy: u8,
    pub goals: String,
    pub available_hours: f64,
    pub timestamp: String,
}
