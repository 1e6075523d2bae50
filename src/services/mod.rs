pub mod chat;
pub mod llm;
pub mod recommender;

pub use chat::ChatRecommender;
pub use llm::{GeminiClient, LlmClient};
pub use recommender::recommend;
