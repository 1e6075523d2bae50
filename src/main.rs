use std::sync::Arc;

use book_recommender::{
    api::{create_router, AppState},
    config::Config,
    db::{self, SqlCatalog},
    services::GeminiClient,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "book_recommender=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let pool = db::create_pool(&config.database_url).await?;
    let book_count = db::seed::count_books(&pool).await?;
    if book_count == 0 {
        tracing::warn!("Catalog is empty; run the `seed` binary to load sample books");
    }

    let llm = GeminiClient::from_config(&config)?;
    if config.gemini_api_key.as_deref().map_or(true, |key| key.trim().is_empty()) {
        tracing::warn!("GEMINI_API_KEY is not set; chat will answer with catalog defaults");
    }

    let state = AppState::new(Arc::new(SqlCatalog::new(pool)), Arc::new(llm));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(
        address = %config.bind_address(),
        books = book_count,
        model = %config.gemini_model,
        "Server running"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
