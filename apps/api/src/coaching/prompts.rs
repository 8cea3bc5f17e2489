/// Tip prompt template. Replace `{mood}`, `{energy}` and `{recent}` before sending.
pub const TIP_PROMPT_TEMPLATE: &str = "You are a mindful productivity coach. Based on:
Mood: {mood}/10
Energy: {energy}/10
Recent: {recent}

Give ONE short, encouraging productivity tip (max 2 sentences). Be warm and supportive.";

/// Used when the caller gives no recent activity.
pub const DEFAULT_RECENT_ACTIVITY: &str = "Starting fresh";

pub const TIP_TEMPERATURE: f32 = 0.8;
pub const TIP_MAX_TOKENS: u32 = 100;
