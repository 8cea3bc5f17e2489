// Mood/energy journal: write-only log entries and the analytics read-back.

pub mod analytics;
pub mod handlers;
pub mod log;
