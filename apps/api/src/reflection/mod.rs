// Reflection chat with the coaching persona.
// One stored conversation per user per day under `chat:<userId>:<date>`.

pub mod chat;
pub mod handlers;
pub mod prompts;
