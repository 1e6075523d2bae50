use std::sync::Arc;

use crate::{
    db::CatalogStore,
    models::RecommendationDefaults,
    services::{ChatRecommender, LlmClient},
};

/// Shared application state
///
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogStore>,
    pub chat: ChatRecommender,
    pub defaults: RecommendationDefaults,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogStore>, llm: Arc<dyn LlmClient>) -> Self {
        Self {
            chat: ChatRecommender::new(catalog.clone(), llm),
            catalog,
            defaults: RecommendationDefaults::default(),
        }
    }
}
