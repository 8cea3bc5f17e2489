// Daily schedule generation and retrieval.
// All LLM calls go through llm_client; all persistence goes through store.

pub mod handlers;
pub mod prompts;
pub mod service;
