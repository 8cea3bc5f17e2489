//! Reflection chat — one turn of the day's coaching conversation.
//!
//! Flow: load today's stored history → reconcile with the client's copy →
//!       system + history + new message → LLM → persist extended history.
//!
//! Reconciliation rules (see `reconcile_history`):
//! - the client's history extends the stored one → client copy is used
//! - the stored history extends the client's (e.g. a reloaded page that lost
//!   its local state) → stored copy is used
//! - neither is a prefix of the other → client copy wins, and the stored
//!   copy is overwritten
//!
//! Concurrent turns for the same user and day still race; the last write wins.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::llm_client::{CompletionOptions, CompletionProvider};
use crate::models::chat::{ChatHistory, ChatTurn};
use crate::reflection::prompts::{REFLECTION_MAX_TOKENS, REFLECTION_SYSTEM, REFLECTION_TEMPERATURE};
use crate::store::keys::{chat_key, iso_timestamp};
use crate::store::{KeyValueStore, StoreError};
use crate::validation::{require_non_empty, validate_user_id};

/// Request body for POST /chat.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub user_id: String,
    /// Absent and `null` both mean an empty client copy.
    #[serde(default)]
    pub conversation_history: Option<Vec<ChatTurn>>,
}

/// Which copy of the conversation a turn was built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistorySource {
    Supplied,
    Stored,
    Diverged,
}

/// Picks the history to extend from the stored copy and the client's copy.
pub fn reconcile_history(stored: &[ChatTurn], supplied: &[ChatTurn]) -> (Vec<ChatTurn>, HistorySource) {
    if supplied.starts_with(stored) {
        (supplied.to_vec(), HistorySource::Supplied)
    } else if stored.starts_with(supplied) {
        (stored.to_vec(), HistorySource::Stored)
    } else {
        (supplied.to_vec(), HistorySource::Diverged)
    }
}

/// Runs one conversation turn and returns the assistant's reply.
pub async fn converse(
    store: &dyn KeyValueStore,
    llm: &dyn CompletionProvider,
    request: &ChatRequest,
    now: DateTime<Utc>,
) -> Result<String, AppError> {
    let user_id = validate_user_id(&request.user_id)?;
    let message = require_non_empty("message", &request.message)?;

    let key = chat_key(user_id, now);
    let stored = match store.get(&key).await? {
        Some(value) => {
            serde_json::from_value::<ChatHistory>(value)
                .map_err(StoreError::from)?
                .history
        }
        None => Vec::new(),
    };

    let supplied = request.conversation_history.as_deref().unwrap_or_default();
    let (mut history, source) = reconcile_history(&stored, supplied);
    match source {
        HistorySource::Diverged => warn!(
            "Chat history for {key} diverged from stored copy ({} stored turns, {} supplied); using supplied",
            stored.len(),
            supplied.len()
        ),
        other => debug!("Chat history for {key} taken from {other:?} copy"),
    }

    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatTurn::system(REFLECTION_SYSTEM));
    messages.extend(history.iter().cloned());
    messages.push(ChatTurn::user(message));

    let reply = llm
        .complete(
            &messages,
            CompletionOptions {
                temperature: REFLECTION_TEMPERATURE,
                max_tokens: Some(REFLECTION_MAX_TOKENS),
            },
        )
        .await?;
    let reply = reply.trim().to_string();

    history.push(ChatTurn::user(message));
    history.push(ChatTurn::assistant(reply.clone()));
    let record = ChatHistory {
        history,
        timestamp: iso_timestamp(now),
    };
    let value = serde_json::to_value(&record).map_err(StoreError::from)?;
    store.set(&key, &value).await?;

    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedProvider;
    use crate::models::chat::Role;
    use crate::store::InMemoryStore;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 21, 0, 0).unwrap()
    }

    fn request(message: &str, history: Vec<ChatTurn>) -> ChatRequest {
        ChatRequest {
            message: message.to_string(),
            user_id: "u1".to_string(),
            conversation_history: Some(history),
        }
    }

    async fn stored_history(store: &InMemoryStore) -> Vec<ChatTurn> {
        let value = store.get("chat:u1:2026-10-19").await.unwrap().unwrap();
        serde_json::from_value::<ChatHistory>(value).unwrap().history
    }

    #[test]
    fn test_reconcile_prefers_longer_consistent_copy() {
        let a = ChatTurn::user("a");
        let b = ChatTurn::assistant("b");

        let (h, src) = reconcile_history(&[], &[a.clone()]);
        assert_eq!((h, src), (vec![a.clone()], HistorySource::Supplied));

        let (h, src) = reconcile_history(&[a.clone(), b.clone()], &[]);
        assert_eq!((h, src), (vec![a.clone(), b.clone()], HistorySource::Stored));

        let (h, src) = reconcile_history(&[a.clone()], &[a.clone(), b.clone()]);
        assert_eq!((h, src), (vec![a.clone(), b.clone()], HistorySource::Supplied));
    }

    #[test]
    fn test_reconcile_divergence_uses_supplied() {
        let stored = vec![ChatTurn::user("a")];
        let supplied = vec![ChatTurn::user("z")];
        let (h, src) = reconcile_history(&stored, &supplied);
        assert_eq!(h, supplied);
        assert_eq!(src, HistorySource::Diverged);
    }

    #[tokio::test]
    async fn test_message_list_is_system_history_then_user() {
        let store = InMemoryStore::new();
        let llm = ScriptedProvider::replying("That sounds like a full day.");
        let history = vec![ChatTurn::user("Hi"), ChatTurn::assistant("Hello! How was today?")];

        converse(&store, &llm, &request("Busy but good", history), now())
            .await
            .unwrap();

        let (messages, options) = llm.calls().remove(0);
        let roles: Vec<Role> = messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant, Role::User]);
        assert!(messages[0].content.contains("2-3 sentences"));
        assert_eq!(messages[3].content, "Busy but good");
        assert_eq!(options.temperature, 0.9);
        assert_eq!(options.max_tokens, Some(150));
    }

    #[tokio::test]
    async fn test_reply_and_extended_history_are_persisted() {
        let store = InMemoryStore::new();
        let llm = ScriptedProvider::replying("  What made it good?  ");

        let reply = converse(&store, &llm, &request("Busy but good", vec![]), now())
            .await
            .unwrap();

        assert_eq!(reply, "What made it good?");
        assert_eq!(
            stored_history(&store).await,
            vec![
                ChatTurn::user("Busy but good"),
                ChatTurn::assistant("What made it good?"),
            ]
        );
    }

    #[tokio::test]
    async fn test_client_without_history_resumes_stored_conversation() {
        let store = InMemoryStore::new();
        converse(&store, &ScriptedProvider::replying("first reply"), &request("first", vec![]), now())
            .await
            .unwrap();

        let llm = ScriptedProvider::replying("second reply");
        converse(&store, &llm, &request("second", vec![]), now())
            .await
            .unwrap();

        let (messages, _) = llm.calls().remove(0);
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[1].content, "first");
        assert_eq!(stored_history(&store).await.len(), 4);
    }

    #[tokio::test]
    async fn test_null_history_resumes_stored_conversation() {
        let store = InMemoryStore::new();
        converse(&store, &ScriptedProvider::replying("first reply"), &request("first", vec![]), now())
            .await
            .unwrap();

        let null_history: ChatRequest = serde_json::from_value(serde_json::json!({
            "message": "second",
            "userId": "u1",
            "conversationHistory": null,
        }))
        .unwrap();
        assert_eq!(null_history.conversation_history, None);

        let llm = ScriptedProvider::replying("second reply");
        converse(&store, &llm, &null_history, now()).await.unwrap();

        let (messages, _) = llm.calls().remove(0);
        assert_eq!(messages.len(), 4);
        assert_eq!(stored_history(&store).await.len(), 4);
    }

    #[tokio::test]
    async fn test_provider_failure_leaves_history_untouched() {
        let store = InMemoryStore::new();
        let err = converse(&store, &ScriptedProvider::failing(500), &request("hi", vec![]), now())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ProviderUnavailable { .. }));
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_blank_message_rejected() {
        let store = InMemoryStore::new();
        let llm = ScriptedProvider::replying("x");
        assert!(matches!(
            converse(&store, &llm, &request("  ", vec![]), now()).await,
            Err(AppError::InvalidInput(_))
        ));
        assert_eq!(llm.call_count(), 0);
    }
}
