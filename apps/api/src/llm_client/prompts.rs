// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it;
// this file contains the cross-cutting pieces.

/// Appended to prompts whose output is parsed as a JSON array.
pub const JSON_ARRAY_ONLY_INSTRUCTION: &str = "\
    Output ONLY valid JSON in this exact format (no markdown, no code fences, no extra text):";

/// Substitutes `{name}` placeholders in a prompt template.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    values.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{name}}}"), value)
    })
}
