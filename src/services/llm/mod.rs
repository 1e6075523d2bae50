//! Text-completion providers used by the chat recommender.

use crate::error::AppResult;

pub mod gemini;

pub use gemini::GeminiClient;

/// A single-shot text completion call
///
/// Implementations return the raw model text; interpreting it is the
/// caller's job. Any transport, credential, or provider failure is an `Err`.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// Completes `prompt` under the `system` instruction
    async fn complete(&self, system: &str, prompt: &str) -> AppResult<String>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}
