use serde::Deserialize;

use crate::coaching::prompts::{
    DEFAULT_RECENT_ACTIVITY, TIP_MAX_TOKENS, TIP_PROMPT_TEMPLATE, TIP_TEMPERATURE,
};
use crate::errors::AppError;
use crate::llm_client::prompts::fill;
use crate::llm_client::{CompletionOptions, CompletionProvider};
use crate::models::chat::ChatTurn;
use crate::validation::validate_scale;

/// Request body for POST /get-tip.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipRequest {
    pub mood: i64,
    pub energy: i64,
    #[serde(default)]
    pub recent_activity: Option<String>,
}

/// Asks the provider for one short coaching tip and returns it trimmed.
pub async fn get_tip(llm: &dyn CompletionProvider, request: &TipRequest) -> Result<String, AppError> {
    let mood = validate_scale("mood", request.mood)?;
    let energy = validate_scale("energy", request.energy)?;
    let recent = request
        .recent_activity
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_RECENT_ACTIVITY);

    let prompt = fill(
        TIP_PROMPT_TEMPLATE,
        &[
            ("mood", &mood.to_string()),
            ("energy", &energy.to_string()),
            ("recent", recent),
        ],
    );

    let tip = llm
        .complete(
            &[ChatTurn::user(prompt)],
            CompletionOptions {
                temperature: TIP_TEMPERATURE,
                max_tokens: Some(TIP_MAX_TOKENS),
            },
        )
        .await?;

    Ok(tip.trim().to_string())
}
