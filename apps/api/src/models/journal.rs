use serde::{Deserialize, Serialize};

/// One mood/energy check-in. Stored under `log:<userId>:<timestamp>:<nonce>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub mood: u8,
    pub energy: u8,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub completed_tasks: u32,
    pub timestamp: String,
}
