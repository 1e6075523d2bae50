use crate::{
    db::CatalogStore,
    error::AppResult,
    models::{Book, CatalogFilter, RecommendationQuery},
};

/// Filters the catalog by genre and minimum rating
///
/// Results are ordered by rating, then rating count, both descending, and
/// truncated to `query.limit`. An empty list is a valid outcome; only store
/// failures are errors.
pub async fn recommend(
    catalog: &dyn CatalogStore,
    query: &RecommendationQuery,
) -> AppResult<Vec<Book>> {
    let filter = CatalogFilter::from(query);
    let books = catalog.top_rated(&filter).await?;

    tracing::info!(
        genre = ?filter.genre,
        min_rating = query.min_rating,
        limit = query.limit,
        results = books.len(),
        "Recommendations computed"
    );

    Ok(books)
}
