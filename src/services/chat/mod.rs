//! Conversational recommendations backed by an LLM.
//!
//! Flow: candidate selection → prompt → single completion call → reply
//! parsing → id resolution. Both LLM failure and unparseable output degrade
//! to the most popular catalog entries with a canned reply.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::{
    db::CatalogStore,
    error::AppResult,
    models::{Book, CatalogFilter, ChatOutcome, ChatTurn, ModelReply},
    services::llm::LlmClient,
};

pub mod prompt;
pub mod reply;

/// Number of top-rated books exposed to the model per request
pub const CANDIDATE_POOL_SIZE: u32 = 30;

/// Number of books returned by either fallback
pub const FALLBACK_SIZE: usize = 5;

/// Reply used when the model cannot be reached
pub const CONNECTION_FALLBACK_REPLY: &str =
    "No he podido conectar con el modelo de lenguaje ahora mismo. Aun así, te puedo \
     recomendar algunos de los libros más populares de la base de datos.";

/// Reply used when the model answered but its output could not be interpreted
pub const PARSE_FALLBACK_REPLY: &str =
    "Ha habido un problema interpretando la respuesta del modelo. Te puedo recomendar \
     algunos de los libros más populares de la base de datos.";

/// Reply used when the model returned an empty answer
pub const DEFAULT_REPLY: &str =
    "Aquí tienes algunas recomendaciones de libros basadas en tus preferencias.";

#[derive(Clone)]
pub struct ChatRecommender {
    catalog: Arc<dyn CatalogStore>,
    llm: Arc<dyn LlmClient>,
}

impl ChatRecommender {
    pub fn new(catalog: Arc<dyn CatalogStore>, llm: Arc<dyn LlmClient>) -> Self {
        Self { catalog, llm }
    }

    /// Answers the conversation with a reply and recommended books
    ///
    /// Never fails because of the model; only catalog errors propagate.
    pub async fn chat(&self, history: &[ChatTurn]) -> AppResult<ChatOutcome> {
        let candidates = self
            .catalog
            .top_rated(&CatalogFilter::top(CANDIDATE_POOL_SIZE))
            .await?;

        let user_prompt = prompt::build_user_prompt(history, &candidates);

        let raw = match self.llm.complete(prompt::SYSTEM_PROMPT, &user_prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    provider = self.llm.name(),
                    "LLM call failed, using popularity fallback"
                );
                return Ok(fallback(CONNECTION_FALLBACK_REPLY, &candidates));
            }
        };

        match reply::parse_model_reply(&raw) {
            ModelReply::Parsed { answer, ids } => {
                let recommendations = self.resolve(&ids).await?;

                if recommendations.len() < ids.len() {
                    tracing::debug!(
                        requested = ids.len(),
                        resolved = recommendations.len(),
                        "Dropped unknown or repeated book ids"
                    );
                }

                let reply = if answer.is_empty() {
                    DEFAULT_REPLY.to_string()
                } else {
                    answer
                };

                Ok(ChatOutcome {
                    reply,
                    recommendations,
                })
            }
            ModelReply::Unparseable { reason } => {
                tracing::warn!(
                    reason = %reason,
                    provider = self.llm.name(),
                    "Could not interpret LLM reply, using popularity fallback"
                );
                tracing::debug!(response = %raw, "Raw LLM reply");
                Ok(fallback(PARSE_FALLBACK_REPLY, &candidates))
            }
        }
    }

    /// Looks up `ids` in the catalog, keeping the model's order
    async fn resolve(&self, ids: &[i64]) -> AppResult<Vec<Book>> {
        let mut seen = HashSet::new();
        let unique: Vec<i64> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();

        let mut by_id: HashMap<i64, Book> = self
            .catalog
            .find_by_ids(&unique)
            .await?
            .into_iter()
            .map(|book| (book.id, book))
            .collect();

        Ok(unique.iter().filter_map(|id| by_id.remove(id)).collect())
    }
}

fn fallback(reply: &str, candidates: &[Book]) -> ChatOutcome {
    ChatOutcome {
        reply: reply.to_string(),
        recommendations: candidates.iter().take(FALLBACK_SIZE).cloned().collect(),
    }
}
