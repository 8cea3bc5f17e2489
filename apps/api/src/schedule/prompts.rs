// All LLM prompt constants for the Schedule module.

/// Schedule prompt template. Replace `{mood}`, `{energy}`, `{goals}`,
/// `{available_hours}` and `{json_instruction}` before sending.
pub const SCHEDULE_PROMPT_TEMPLATE: &str = r#"You are an expert productivity coach. The user has given:
Mood: {mood}/10
Energy Level: {energy}/10
Goals: {goals}
Available Time: {available_hours} hours

Generate a personalized schedule with times, task order, and motivation tips.
{json_instruction}
[
  { "time": "9:00 AM", "task": "task name", "duration": "1h", "tip": "motivation tip" }
]"#;

/// Sampling temperature for schedule generation. No token cap is applied.
pub const SCHEDULE_TEMPERATURE: f32 = 0.7;
