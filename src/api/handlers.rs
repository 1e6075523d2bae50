use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{
        Book, ChatOutcome, ChatTurn, RecommendationDefaults, RecommendationQuery, LIMIT_RANGE,
        MIN_RATING_RANGE,
    },
    services,
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub favorite_genre: Option<String>,
    pub min_rating: Option<f64>,
    pub limit: Option<u32>,
}

impl RecommendationRequest {
    /// Applies defaults and rejects out-of-range values
    pub fn into_query(self, defaults: &RecommendationDefaults) -> AppResult<RecommendationQuery> {
        let min_rating = self.min_rating.unwrap_or(defaults.min_rating);
        if !MIN_RATING_RANGE.contains(&min_rating) {
            return Err(AppError::InvalidInput(format!(
                "min_rating must be between {} and {}",
                MIN_RATING_RANGE.start(),
                MIN_RATING_RANGE.end()
            )));
        }

        let limit = self.limit.unwrap_or(defaults.limit);
        if !LIMIT_RANGE.contains(&limit) {
            return Err(AppError::InvalidInput(format!(
                "limit must be between {} and {}",
                LIMIT_RANGE.start(),
                LIMIT_RANGE.end()
            )));
        }

        Ok(RecommendationQuery {
            genre: self.favorite_genre,
            min_rating,
            limit,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatTurn>,
}

#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub description: Option<String>,
    pub rating: f64,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            genre: book.genre,
            description: book.description,
            rating: book.rating,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<BookResponse>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub recommendations: Vec<BookResponse>,
}

impl From<ChatOutcome> for ChatResponse {
    fn from(outcome: ChatOutcome) -> Self {
        Self {
            reply: outcome.reply,
            recommendations: outcome
                .recommendations
                .into_iter()
                .map(BookResponse::from)
                .collect(),
        }
    }
}

/// Turns a body extraction failure into a 400 with the usual error shape
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::InvalidInput(rejection.body_text()))
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Filter-based recommendations
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let query = json_body(payload)?.into_query(&state.defaults)?;

    tracing::info!(
        request_id = %request_id,
        genre = ?query.genre,
        min_rating = query.min_rating,
        limit = query.limit,
        "Processing recommendation request"
    );

    let books = services::recommend(state.catalog.as_ref(), &query).await?;

    Ok(Json(RecommendationResponse {
        recommendations: books.into_iter().map(BookResponse::from).collect(),
    }))
}

/// LLM-backed conversational recommendations
pub async fn chat(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let request = json_body(payload)?;

    tracing::info!(
        request_id = %request_id,
        turns = request.messages.len(),
        "Processing chat request"
    );

    let outcome = state.chat.chat(&request.messages).await?;

    tracing::info!(
        request_id = %request_id,
        recommendations = outcome.recommendations.len(),
        "Chat completed"
    );

    Ok(Json(ChatResponse::from(outcome)))
}
