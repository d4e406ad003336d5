//! Pairwise judge backed by hosted chat models
//!
//! The model identifier picks the provider, either by an explicit prefix
//! (`openai:gpt-4.1`, `github/gpt-4o-mini`) or by the model name itself
//! (`gemini-2.5-flash`, `grok-3`). Credentials come from the environment.
//!
//! Every failure (missing key, transport error, non-2xx status, an answer
//! without a JSON object) is logged and reported to the caller as `None`.

mod client;
mod parse;
mod prompt;
mod provider;

pub use client::{CallError, ChatJudge, DEFAULT_TIMEOUT_SECS};
pub use parse::{extract_json_object, verdict_from_json};
pub use prompt::{user_prompt, SYSTEM_PROMPT};
pub use provider::{resolve_provider, Credentials, Provider};
