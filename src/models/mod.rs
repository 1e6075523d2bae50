pub mod book;
pub mod chat;
pub mod query;

pub use book::{Book, NewBook};
pub use chat::{ChatOutcome, ChatRole, ChatTurn, ModelReply};
pub use query::{
    CatalogFilter, RecommendationDefaults, RecommendationQuery, LIMIT_RANGE, MIN_RATING_RANGE,
};
