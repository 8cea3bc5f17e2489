// Short-form coaching tips. Stateless: nothing is persisted.

pub mod handlers;
pub mod prompts;
pub mod tip;
