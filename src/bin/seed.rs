use book_recommender::{config::Config, db};

/// Recreates the catalog with the sample books
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "book_recommender=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;

    let inserted = db::seed::reseed(&pool, &db::seed::sample_catalog()).await?;
    tracing::info!(
        database_url = %config.database_url,
        inserted = inserted,
        "Database created and seeded with sample books"
    );

    Ok(())
}
